use std::net::IpAddr;

use time::PrimitiveDateTime;

/// Row appended to the `scores` table by a successful ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct NewScoreEntity {
    /// Leaderboard the score belongs to.
    pub game: String,
    /// Player initials, already uppercased.
    pub initials: String,
    /// Submitted score, finite and non-negative.
    pub score: f64,
    /// 24-bit RGB color, only stored when the color capability is enabled.
    pub color: Option<u32>,
    /// Server-side ingest time (UTC).
    pub timestamp: PrimitiveDateTime,
    /// Submitting peer, only stored when IP capture is enabled.
    pub ip_addr: Option<IpAddr>,
}

/// Row returned by a ranking query.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedScoreEntity {
    /// Player initials as stored.
    pub initials: String,
    /// Stored score.
    pub score: f64,
    /// Stored color, `None` for rows written without the color capability.
    pub color: Option<u32>,
}
