use crate::models::{GameRecord, RecordStatistics, WinRate};

/// Win rates split by the mercy-ban flag, plus the overall rate
pub fn compute_statistics(records: &[GameRecord]) -> RecordStatistics {
    let (banned, not_banned): (Vec<&GameRecord>, Vec<&GameRecord>) =
        records.iter().partition(|record| record.mercy_banned);

    RecordStatistics {
        mercy_banned: WinRate::from_records(banned),
        mercy_not_banned: WinRate::from_records(not_banned),
        overall: WinRate::from_records(records),
    }
}
