use chrono::{Duration, Utc};

use helpdesk_core::{format_timestamp, ServiceError};
use helpdesk_sql::{Row, Value};

use super::{storage, text, wire, HelpdeskService};
use crate::model::{
    Category, CategoryCount, DayCount, Overview, StoreCategoryCount, StoreCount, Timeline,
};

const TOP_N: i64 = 10;
const DEFAULT_DAYS: i64 = 30;
const MAX_DAYS: i64 = 365;

fn count(row: &Row) -> i64 {
    row.get_i64("cnt").unwrap_or(0)
}

fn row_to_store_count(row: &Row) -> Result<StoreCount, ServiceError> {
    Ok(StoreCount {
        store_id: text(row, "store_id")?,
        count: count(row),
    })
}

fn row_to_category_count(row: &Row) -> Result<CategoryCount, ServiceError> {
    Ok(CategoryCount {
        category: wire(row, "category", Category::parse)?,
        count: count(row),
    })
}

fn row_to_store_category(row: &Row) -> Result<StoreCategoryCount, ServiceError> {
    Ok(StoreCategoryCount {
        store_id: text(row, "store_id")?,
        category: wire(row, "category", Category::parse)?,
        count: count(row),
    })
}

fn row_to_day(row: &Row) -> Result<DayCount, ServiceError> {
    Ok(DayCount {
        day: text(row, "day")?,
        count: count(row),
    })
}

impl HelpdeskService {
    /// Ticket total plus the busiest stores and categories.
    pub fn report_overview(&self) -> Result<Overview, ServiceError> {
        self.in_tx(|tx| {
            let total = tx
                .query("SELECT COUNT(*) AS cnt FROM tickets", &[])
                .map_err(storage)?
                .first()
                .map(count)
                .unwrap_or(0);

            let top_stores = tx
                .query(
                    "SELECT store_id, COUNT(*) AS cnt FROM tickets GROUP BY store_id \
                     ORDER BY cnt DESC, store_id ASC LIMIT ?1",
                    &[Value::Integer(TOP_N)],
                )
                .map_err(storage)?
                .iter()
                .map(row_to_store_count)
                .collect::<Result<Vec<_>, _>>()?;

            let top_categories = tx
                .query(
                    "SELECT category, COUNT(*) AS cnt FROM tickets GROUP BY category \
                     ORDER BY cnt DESC, category ASC LIMIT ?1",
                    &[Value::Integer(TOP_N)],
                )
                .map_err(storage)?
                .iter()
                .map(row_to_category_count)
                .collect::<Result<Vec<_>, _>>()?;

            Ok(Overview {
                total_tickets: total,
                top_stores,
                top_categories,
            })
        })
    }

    /// Ticket counts per (store, category), largest first.
    pub fn report_store_category(&self) -> Result<Vec<StoreCategoryCount>, ServiceError> {
        self.in_tx(|tx| {
            tx.query(
                "SELECT store_id, category, COUNT(*) AS cnt FROM tickets \
                 GROUP BY store_id, category ORDER BY cnt DESC, store_id ASC, category ASC",
                &[],
            )
            .map_err(storage)?
            .iter()
            .map(row_to_store_category)
            .collect()
        })
    }

    /// Tickets created per UTC day over the last `days` days (default 30,
    /// clamped to 1..=365), oldest day first.
    pub fn report_timeline(&self, days: Option<i64>) -> Result<Timeline, ServiceError> {
        let days = days.unwrap_or(DEFAULT_DAYS).clamp(1, MAX_DAYS);
        let since = format_timestamp(Utc::now() - Duration::days(days));

        let timeline = self.in_tx(|tx| {
            tx.query(
                "SELECT substr(created_at, 1, 10) AS day, COUNT(*) AS cnt FROM tickets \
                 WHERE created_at >= ?1 GROUP BY day ORDER BY day ASC",
                &[Value::Text(since)],
            )
            .map_err(storage)?
            .iter()
            .map(row_to_day)
            .collect::<Result<Vec<_>, _>>()
        })?;

        Ok(Timeline { days, timeline })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CreateTicket, Impact};
    use crate::service::tests::{admin, make_store, test_service, ticket_input};
    use crate::service::HelpdeskService;

    fn file(svc: &HelpdeskService, input: CreateTicket) {
        svc.create_ticket(&admin(), input).unwrap();
    }

    #[test]
    fn empty_reports() {
        let (svc, _dir) = test_service();
        let overview = svc.report_overview().unwrap();
        assert_eq!(overview.total_tickets, 0);
        assert!(overview.top_stores.is_empty());
        assert!(svc.report_store_category().unwrap().is_empty());
        assert!(svc.report_timeline(None).unwrap().timeline.is_empty());
    }

    #[test]
    fn overview_ranks_stores_and_categories() {
        let (svc, _dir) = test_service();
        let a = make_store(&svc, "A");
        let b = make_store(&svc, "B");

        for _ in 0..3 {
            file(&svc, ticket_input(&a, Impact::Info));
        }
        let mut wan = ticket_input(&b, Impact::SalesStopped);
        wan.category = Category::InternetWan;
        file(&svc, wan);

        let overview = svc.report_overview().unwrap();
        assert_eq!(overview.total_tickets, 4);
        assert_eq!(
            overview.top_stores,
            [
                StoreCount { store_id: a.id.clone(), count: 3 },
                StoreCount { store_id: b.id.clone(), count: 1 },
            ]
        );
        assert_eq!(overview.top_categories[0].category, Category::Pos);
        assert_eq!(overview.top_categories[0].count, 3);

        let grid = svc.report_store_category().unwrap();
        assert_eq!(grid.len(), 2);
        assert_eq!(grid[0].store_id, a.id);
        assert_eq!(grid[0].count, 3);
        assert_eq!(grid[1].category, Category::InternetWan);
    }

    #[test]
    fn timeline_counts_today_and_clamps_days() {
        let (svc, _dir) = test_service();
        let store = make_store(&svc, "A");
        file(&svc, ticket_input(&store, Impact::Info));
        file(&svc, ticket_input(&store, Impact::Partial));

        let timeline = svc.report_timeline(Some(7)).unwrap();
        assert_eq!(timeline.days, 7);
        assert_eq!(timeline.timeline.len(), 1);
        assert_eq!(timeline.timeline[0].count, 2);
        assert_eq!(timeline.timeline[0].day, Utc::now().format("%Y-%m-%d").to_string());

        assert_eq!(svc.report_timeline(Some(0)).unwrap().days, 1);
        assert_eq!(svc.report_timeline(Some(9999)).unwrap().days, 365);
        assert_eq!(svc.report_timeline(None).unwrap().days, 30);
    }
}
