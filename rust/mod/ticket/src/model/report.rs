use serde::Serialize;

use super::Category;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreCount {
    pub store_id: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: i64,
}

/// Headline numbers for the admin dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub total_tickets: i64,
    /// Up to ten stores with the most tickets.
    pub top_stores: Vec<StoreCount>,
    /// Up to ten categories with the most tickets.
    pub top_categories: Vec<CategoryCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreCategoryCount {
    pub store_id: String,
    pub category: Category,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCount {
    /// `YYYY-MM-DD` (UTC).
    pub day: String,
    pub count: i64,
}

/// Tickets created per day over the last `days` days, oldest first.
#[derive(Debug, Clone, Serialize)]
pub struct Timeline {
    pub days: i64,
    pub timeline: Vec<DayCount>,
}
