//! Static threshold tables
//!
//! Two ordered mappings from failure-count thresholds to strings:
//! - `MILESTONES`: celebratory messages fired once when an increment
//!   crosses the threshold
//! - `TITLES`: decorative rank labels shown in the leaderboard
//!
//! Both are loaded once and immutable for the process lifetime. The sets
//! are small (under ten entries), so lookups are linear scans.

use once_cell::sync::Lazy;

/// Immutable ascending association list of `(threshold, label)`
#[derive(Debug, Clone)]
pub struct ThresholdTable {
    entries: Vec<(u32, String)>,
}

impl ThresholdTable {
    /// Build a table, sorting entries by threshold ascending.
    ///
    /// Duplicate thresholds keep the last entry.
    #[must_use]
    pub fn new<L: Into<String>>(entries: impl IntoIterator<Item = (u32, L)>) -> Self {
        let mut entries: Vec<(u32, String)> =
            entries.into_iter().map(|(t, l)| (t, l.into())).collect();
        entries.sort_by_key(|(t, _)| *t);
        entries.dedup_by(|a, b| a.0 == b.0);
        Self { entries }
    }

    /// Thresholds crossed when the counter moves from `old` to `new`:
    /// every `t` with `old < t <= new`, in ascending order.
    ///
    /// A two-step increment can cross two thresholds in one call; both are
    /// returned. Thresholds at or below `old` were already passed and are
    /// never repeated.
    #[must_use]
    pub fn crossed(&self, old: u32, new: u32) -> Vec<(u32, &str)> {
        self.entries
            .iter()
            .filter(|(t, _)| *t > old && *t <= new)
            .map(|(t, l)| (*t, l.as_str()))
            .collect()
    }

    /// Label of the highest threshold at or below `count`, if any
    #[must_use]
    pub fn label_for(&self, count: u32) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(t, _)| *t <= count)
            .map(|(_, l)| l.as_str())
    }

    /// Iterate entries in ascending threshold order
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.entries.iter().map(|(t, l)| (*t, l.as_str()))
    }

    /// Number of thresholds
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no thresholds
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Milestone messages, keyed by cumulative failure count
pub static MILESTONES: Lazy<ThresholdTable> = Lazy::new(|| {
    ThresholdTable::new([
        (15, "On se demande si tu ne joues pas avec tes pieds."),
        (
            25,
            "Tu joues à Dofus ou tu es juste là pour tester les limites de tes mates ?",
        ),
        (
            35,
            "Même un Xélor ne voudrait pas revenir en arrière de peur de revivre la honte que tu proposes.",
        ),
        (
            55,
            "Tu es le genre de personne qui a besoin de 55 échecs pour comprendre que tu es mauvais.",
        ),
        (
            65,
            "J'espère que tu gardes un carnet pour noter toutes tes prouesses d'incompétence.",
        ),
        (
            95,
            "C'était pas un chal, c'était un test de patience pour tes coéquipiers.",
        ),
        (
            115,
            "Rater à ce niveau, c'est plus de l'acharnement, c'est de l'art.",
        ),
        (
            130,
            "Le vrai challenge, c'est de comprendre comment t'as réussi à installer le jeu.",
        ),
        (
            150,
            "C'est pas une faille temporelle, c'est juste toi qui es nul.",
        ),
    ])
});

/// Rank titles, keyed by cumulative failure count
pub static TITLES: Lazy<ThresholdTable> = Lazy::new(|| {
    ThresholdTable::new([
        (5, "Débutant dans l'Art du Ratage"),
        (10, "Juste le boss enfaite"),
        (25, "Maître du \"Presque Réussi\""),
        (50, "Héraut des Fails Inoubliables"),
        (100, "Seigneur des Échecs Mémorables"),
        (250, "Architecte des Désastres Planifiés"),
        (300, "Celui-qui-rate-tout"),
        (1000, "Dieu des Râtés Légendaires"),
    ])
});
