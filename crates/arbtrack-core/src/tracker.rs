//! Day entry workflow: validate, compute, store, advise

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info};

use crate::calculator::ProfitCalculator;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::insights::{recommend, Recommendation};
use crate::models::{DailyBreakdown, DailyInputs};
use crate::store::RecordStore;

/// What the entry screen shows after a day is saved
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDay {
    pub date: NaiveDate,
    pub record: DailyBreakdown,
    /// The record this one overwrote, if the date was already filled in
    pub replaced: Option<DailyBreakdown>,
    pub recommendations: Vec<Recommendation>,
}

/// Compute and persist one day, then advise against the updated history
///
/// The history used for advice includes the day just written.
pub fn record_day(
    store: &dyn RecordStore,
    config: &EngineConfig,
    user_id: &str,
    date: NaiveDate,
    inputs: &DailyInputs,
    created_at: DateTime<Utc>,
) -> Result<RecordedDay> {
    inputs.validate()?;

    let record = ProfitCalculator::new(config).breakdown(inputs, created_at);
    let replaced = store.get(user_id, date)?;
    store.upsert(user_id, date, &record)?;

    if replaced.is_some() {
        info!(user = user_id, date = %date, "Replaced existing record");
    }

    let history = store.load(user_id)?;
    let recommendations = recommend(&record, &history);
    debug!(count = recommendations.len(), "Recommendations computed");

    Ok(RecordedDay {
        date,
        record,
        replaced,
        recommendations,
    })
}

/// Recommendations for a stored day, or `None` if nothing was recorded
pub fn recommend_for_day(
    store: &dyn RecordStore,
    user_id: &str,
    date: NaiveDate,
) -> Result<Option<Vec<Recommendation>>> {
    let history = store.load(user_id)?;
    Ok(history.get(date).map(|record| recommend(record, &history)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::store::MemoryStore;
    use crate::test_utils::{date, timestamp};

    fn inputs(deposits: u32, ad_spend: f64) -> DailyInputs {
        DailyInputs {
            geo: "Philippines".to_string(),
            deposit_rate: 20.0,
            deposits,
            ad_spend,
            additional_expenses: 0.0,
        }
    }

    #[test]
    fn test_record_day_stores_and_advises() {
        let store = MemoryStore::new();
        let config = EngineConfig::default();

        let day = record_day(
            &store,
            &config,
            "me",
            date(2024, 1, 1),
            &inputs(5, 100.0),
            timestamp(),
        )
        .unwrap();

        assert_eq!(day.record.net_profit, -2.0);
        assert!(day.replaced.is_none());
        // A losing record day scales the record thresholds below itself
        assert_eq!(
            day.recommendations,
            vec![
                Recommendation::CriticalRoi,
                Recommendation::BelowRecord { best_profit: -2.0 }
            ]
        );
        assert_eq!(store.get("me", date(2024, 1, 1)).unwrap(), Some(day.record));
    }

    #[test]
    fn test_record_day_reports_replacement() {
        let store = MemoryStore::new();
        let config = EngineConfig::default();

        let day = date(2024, 1, 1);
        record_day(&store, &config, "me", day, &inputs(5, 100.0), timestamp()).unwrap();
        let second =
            record_day(&store, &config, "me", day, &inputs(20, 100.0), timestamp()).unwrap();

        assert_eq!(second.replaced.map(|r| r.deposits), Some(5));
        assert_eq!(store.load("me").unwrap().len(), 1);
    }

    #[test]
    fn test_record_day_rejects_invalid_inputs() {
        let store = MemoryStore::new();
        let result = record_day(
            &store,
            &EngineConfig::default(),
            "me",
            date(2024, 1, 1),
            &inputs(5, -1.0),
            timestamp(),
        );

        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert!(store.load("me").unwrap().is_empty());
    }

    #[test]
    fn test_recommend_for_missing_day() {
        let store = MemoryStore::new();
        assert!(recommend_for_day(&store, "me", date(2024, 1, 1))
            .unwrap()
            .is_none());
    }
}
