//! User-visible strings
//!
//! Every recognized condition maps to exactly one message here. The humor
//! bank is opaque data consumed by the add-fail acknowledgement.

use rand::Rng;

/// Amount outside the accepted range
pub const AMOUNT_OUT_OF_RANGE: &str = "Le nombre d'échecs doit être entre 1 et 2.";

/// Missing or blank participant name
pub const NAME_REQUIRED: &str = "Le nom de l'utilisateur est requis.";

/// No channel configured for the server
pub const NO_CHANNEL_CONFIGURED: &str =
    "Aucun canal configuré pour ce serveur. Veuillez utiliser la commande `/startup` pour en configurer un.";

/// Leaderboard requested with no participants
pub const EMPTY_LEADERBOARD: &str = "Aucun utilisateur enregistré.";

/// Pagination control attempt by a non-owner
pub const UNAUTHORIZED_PAGINATION: &str = "Vous ne pouvez pas contrôler cette pagination.";

/// Navigation against an expired session
pub const PAGINATION_EXPIRED: &str = "Cette pagination n'est plus active.";

/// Generic failure surfaced for infrastructure errors
pub const GENERIC_ERROR: &str = "Erreur lors du traitement de la commande.";

/// Channel configured acknowledgement
#[must_use]
pub fn channel_configured(channel: &str) -> String {
    format!("Le canal {channel} est maintenant configuré pour ce serveur.")
}

/// Running total after an increment
#[must_use]
pub fn fail_total(name: &str, total: u32) -> String {
    format!("{name} a maintenant {total} échecs.")
}

/// One line per crossed milestone
#[must_use]
pub fn milestone_line(total: u32, message: &str) -> String {
    format!("**{total} Échecs** 🎉 - {message}")
}

/// Decrement against an unknown participant
#[must_use]
pub fn user_not_found(name: &str) -> String {
    format!("L'utilisateur {name} n'existe pas.")
}

/// Decrement against a zero counter
#[must_use]
pub fn no_fails_to_remove(name: &str) -> String {
    format!("{name} n'a pas d'échecs à retirer.")
}

/// Successful decrement summary
#[must_use]
pub fn fails_removed(name: &str, total: u32, removed: u32) -> String {
    let plural = if removed > 1 { "s" } else { "" };
    format!("{removed} échec{plural} a été retiré pour {name}. Total : {total}.")
}

/// Add-fail acknowledgement to the invoker
#[must_use]
pub fn fails_added_ack(name: &str) -> String {
    format!("Les échecs ont été ajoutés pour {name}.")
}

/// Remove-fail acknowledgement to the invoker
#[must_use]
pub fn fails_removed_ack(name: &str) -> String {
    format!("Les échecs ont été retirés pour {name}.")
}

/// Leaderboard-sent acknowledgement to the invoker
#[must_use]
pub fn leaderboard_sent_ack(channel: &str) -> String {
    format!("Le classement a été envoyé dans {channel}.")
}

/// Humor bank shown alongside new failures
pub const RANDOM_MESSAGES: [&str; 6] = [
    "C'est pas une faille temporelle, c'est juste toi qui es nul.",
    "Arrête de farmer les échecs, c'est pas une ressource rare !",
    "Si les échecs étaient des succès, tu serais le meilleur joueur de Dofus.",
    "Encore un échec ? À ce rythme, tu devrais te spécialiser en métiers d'artisanat.",
    "Même les Ecaflips n'ont jamais vu autant de malchance !",
    "Si les devs voyaient ton gameplay, ils mettraient un succès pour 'Challenge Briseur'.",
];

/// Pick one humor line
#[must_use]
pub fn random_humor(rng: &mut impl Rng) -> &'static str {
    RANDOM_MESSAGES[rng.gen_range(0..RANDOM_MESSAGES.len())]
}

/// Command summary for the help command
pub const HELP_TEXT: &str = "\
Voici la liste des commandes disponibles du bot :
/addfail <utilisateur> <quantité> — Ajoute un ou plusieurs challenges ratés à un utilisateur (quantité 1 ou 2, 1 par défaut).
/removefail <utilisateur> <quantité> — Retire un ou plusieurs challenges ratés d'un utilisateur (quantité 1 ou 2, 1 par défaut).
/leaderboard — Affiche le mur de la honte, c'est-à-dire le classement des échecs enregistrés.
/startup — Définit le canal courant comme canal de publication du bot.";
