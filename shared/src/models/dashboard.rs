//! Dashboard metrics model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Aggregate metrics for the dashboard landing page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub total_users: u64,
    pub total_orders: u64,
    pub total_revenue: f64,
    pub avg_conversion: f64,
    /// Visits per weekday, Monday first
    pub weekly_visits: Vec<u32>,
    pub user_distribution: Vec<DistributionSlice>,
}

/// One slice of the user-distribution chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributionSlice {
    pub value: u64,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Success,
    Pending,
}

/// Realtime transaction feed entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub user: String,
    pub amount: f64,
    pub status: TransactionStatus,
    pub time: DateTime<Utc>,
}
