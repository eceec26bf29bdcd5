//! Leaderboard rendering
//!
//! Loads the full ranked set of participants for a server, chunks it into
//! fixed-size pages and formats one page at a time. Rendering is pure; the
//! only suspension point is the store read in [`RankedBoard::load`].

use crate::error::CoreError;
use crate::tables::TITLES;
use shamewall_store::{ParticipantRecord, RecordStore, ServerId};

/// Participants per page
pub const PAGE_SIZE: usize = 10;

/// Leaderboard heading
pub const BOARD_TITLE: &str = "Classement du mur de la honte";

/// Title shown below the lowest title threshold
pub const FALLBACK_TITLE: &str = "Explorateur des Fails";

/// Rank title for a failure count: highest title threshold at or below the
/// count, or the fallback below every threshold
#[inline]
#[must_use]
pub fn title_for(fail_count: u32) -> &'static str {
    TITLES.label_for(fail_count).unwrap_or(FALLBACK_TITLE)
}

/// The full ranked set for one server, ready to paginate
///
/// Ranking is `fail_count` descending. The store leaves ordering among
/// equal counts unspecified, so a deterministic tie-break is applied here:
/// lowercased name ascending.
#[derive(Debug, Clone)]
pub struct RankedBoard {
    records: Vec<ParticipantRecord>,
    total_fails: u64,
}

impl RankedBoard {
    /// Load and rank every participant of a server.
    ///
    /// # Errors
    /// - `CoreError::EmptyLeaderboard` if the server has no participants
    /// - `CoreError::Store` if the read fails
    pub async fn load(store: &dyn RecordStore, server: &ServerId) -> Result<Self, CoreError> {
        let records = store.find_all_sorted(server).await?;
        if records.is_empty() {
            tracing::info!(server = %server, "empty leaderboard requested");
            return Err(CoreError::EmptyLeaderboard);
        }
        tracing::info!(server = %server, participants = records.len(), "leaderboard loaded");
        Ok(Self::from_records(records))
    }

    /// Rank an already-fetched record set (test seam)
    #[must_use]
    pub fn from_records(mut records: Vec<ParticipantRecord>) -> Self {
        records.sort_by(|a, b| {
            b.fail_count
                .cmp(&a.fail_count)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        let total_fails = records.iter().map(|r| u64::from(r.fail_count)).sum();
        Self {
            records,
            total_fails,
        }
    }

    /// Number of ranked participants
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the board holds no participants (never true after `load`)
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of pages: `ceil(len / PAGE_SIZE)`
    #[inline]
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.records.len().div_ceil(PAGE_SIZE)
    }

    /// Sum of fail counts across the whole ranked set (not one page)
    #[inline]
    #[must_use]
    pub fn total_fails(&self) -> u64 {
        self.total_fails
    }

    /// Records on one page; the last page may be shorter
    #[must_use]
    pub fn page(&self, page_index: usize) -> &[ParticipantRecord] {
        let start = page_index.min(self.total_pages().saturating_sub(1)) * PAGE_SIZE;
        let end = (start + PAGE_SIZE).min(self.records.len());
        &self.records[start..end]
    }

    /// Format one page for display.
    ///
    /// Out-of-range indices are clamped to the last page.
    #[must_use]
    pub fn render_page(&self, page_index: usize) -> RenderedPage {
        let page_index = page_index.min(self.total_pages().saturating_sub(1));
        let entries = self
            .page(page_index)
            .iter()
            .enumerate()
            .map(|(local, record)| {
                let rank = page_index * PAGE_SIZE + local + 1;
                BoardEntry {
                    rank,
                    glyph: rank_glyph(rank),
                    name: record.name.clone(),
                    title: title_for(record.fail_count).to_owned(),
                    fail_count: record.fail_count,
                }
            })
            .collect();

        RenderedPage {
            title: BOARD_TITLE.to_owned(),
            entries,
            footer: format!(
                "Page {} sur {} | Total des échecs : {}",
                page_index + 1,
                self.total_pages(),
                self.total_fails
            ),
            page_index,
            total_pages: self.total_pages(),
        }
    }
}

/// Marker for a rank: distinct medals for the podium, generic otherwise
#[inline]
#[must_use]
fn rank_glyph(rank: usize) -> &'static str {
    match rank {
        1 => "🥇",
        2 => "🥈",
        3 => "🥉",
        _ => "👤",
    }
}

/// One formatted leaderboard page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// Board heading
    pub title: String,
    /// One entry per participant on the page
    pub entries: Vec<BoardEntry>,
    /// Page position and the board-wide failure total
    pub footer: String,
    /// Zero-based page index
    pub page_index: usize,
    /// Total page count
    pub total_pages: usize,
}

impl std::fmt::Display for RenderedPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.title)?;
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        write!(f, "{}", self.footer)
    }
}

/// One display line of a leaderboard page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardEntry {
    /// Absolute rank across all pages, 1-based
    pub rank: usize,
    /// Podium medal or generic marker
    pub glyph: &'static str,
    /// Participant name, original casing
    pub name: String,
    /// Rank title for the participant's count
    pub title: String,
    /// Failure count
    pub fail_count: u32,
}

impl BoardEntry {
    /// Heading part: marker, rank and name
    #[must_use]
    pub fn heading(&self) -> String {
        format!("{} {}. {}", self.glyph, self.rank, self.name)
    }

    /// Body part: bold count with singular/plural wording
    #[must_use]
    pub fn body(&self) -> String {
        let word = if self.fail_count == 1 {
            "échec"
        } else {
            "échecs"
        };
        format!("**{}** {}", self.fail_count, word)
    }
}

impl std::fmt::Display for BoardEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.heading(), self.body())
    }
}
