// Season standings models

use serde::{Deserialize, Serialize};

/// Win/loss record for one grade level; ties count as neither
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeRecord {
    pub wins: u32,
    pub losses: u32,
}

/// Season standings per grade level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonStats {
    #[serde(rename = "7th")]
    pub seventh: GradeRecord,
    #[serde(rename = "8th")]
    pub eighth: GradeRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_keys_on_the_wire() {
        let stats = SeasonStats {
            seventh: GradeRecord { wins: 3, losses: 1 },
            eighth: GradeRecord { wins: 0, losses: 2 },
        };
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["7th"]["wins"], 3);
        assert_eq!(json["8th"]["losses"], 2);
    }
}
