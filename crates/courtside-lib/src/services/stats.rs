// Season standings
// Tallies wins and losses per grade level from recorded scores. Ties count
// as neither, and non-conference games are excluded entirely.

use crate::models::{Event, GradeRecord, SeasonStats};

/// Compute season standings from the event list
pub fn season_stats(events: &[Event]) -> SeasonStats {
    let mut stats = SeasonStats::default();

    for event in events.iter().filter(|e| !e.is_non_conference) {
        tally(&mut stats.seventh, event.score_7th(), event.is_home);
        tally(&mut stats.eighth, event.score_8th(), event.is_home);
    }

    stats
}

/// Score pairs are stored as (home, away); our side depends on the venue
fn tally(record: &mut GradeRecord, score: Option<(i64, i64)>, is_home: bool) {
    let Some((home, away)) = score else {
        return;
    };

    let (ours, theirs) = if is_home { (home, away) } else { (away, home) };
    if ours > theirs {
        record.wins += 1;
    } else if ours < theirs {
        record.losses += 1;
    }
}
