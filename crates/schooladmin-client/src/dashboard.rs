//! Dashboard summary statistics.

use serde::Serialize;
use tracing::debug;

use schooladmin_core::result::AppResult;
use schooladmin_core::traits::Resource;
use schooladmin_core::traits::transport::ApiRequest;
use schooladmin_entity::{Bill, BillStatus, Student, Teacher};

use crate::api::ApiClient;
use crate::envelope::{ItemExtractor, PageMeta};

/// Headline numbers on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    /// Students known to the backend.
    pub total_students: u64,
    /// Teachers known to the backend.
    pub total_teachers: u64,
    /// Bills still `Pending` or `Verifying`.
    pub pending_bills: u64,
    /// Sum of `Paid` bill amounts.
    pub total_revenue: f64,
}

impl DashboardStats {
    /// Combine the two head counts with figures derived from `bills`.
    pub fn from_bills(total_students: u64, total_teachers: u64, bills: &[Bill]) -> Self {
        let pending_bills = bills.iter().filter(|b| b.status.is_outstanding()).count() as u64;
        let total_revenue = bills
            .iter()
            .filter(|b| b.status == BillStatus::Paid)
            .map(Bill::amount_value)
            .sum();

        Self {
            total_students,
            total_teachers,
            pending_bills,
            total_revenue,
        }
    }
}

/// Fetches [`DashboardStats`].
#[derive(Debug, Clone)]
pub struct DashboardService {
    client: ApiClient,
    /// `limit` used when pulling bills to aggregate.
    bulk_limit: u64,
}

impl DashboardService {
    /// Create a service.
    pub fn new(client: ApiClient, bulk_limit: u64) -> Self {
        Self { client, bulk_limit }
    }

    /// Issue the three reads in parallel and aggregate.
    ///
    /// Head counts come from `totalItems` on a one-row page; a missing
    /// count reads as 0. Any failed read fails the whole fetch.
    pub async fn fetch(&self) -> AppResult<DashboardStats> {
        let (students, teachers, bills) = futures::try_join!(
            self.client.send(ApiRequest::get(Student::PATH).param("limit", 1)),
            self.client.send(ApiRequest::get(Teacher::PATH).param("limit", 1)),
            self.client
                .send(ApiRequest::get(Bill::PATH).param("limit", self.bulk_limit)),
        )?;

        let total_students = PageMeta::from_body(&students.body).total_items.unwrap_or(0);
        let total_teachers = PageMeta::from_body(&teachers.body).total_items.unwrap_or(0);
        let bills: Vec<Bill> = ItemExtractor::for_resource::<Bill>().extract(&bills.body);

        debug!(
            total_students,
            total_teachers,
            bills = bills.len(),
            "Dashboard data fetched"
        );
        Ok(DashboardStats::from_bills(total_students, total_teachers, &bills))
    }
}
