//! Reservation Availability Engine
//!
//! 冲突判定使用半开区间 [start, end)：
//! `existing.start < requested.end && existing.end > requested.start`。
//! 首尾相接（18:00 结束、18:00 开始）不算冲突。

use chrono::{NaiveDate, NaiveTime};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{DiningTable, Reservation};
use crate::db::repository::{DiningTableRepository, ReservationRepository};
use crate::utils::{AppError, AppResult, time};

/// One availability question: who, when
#[derive(Debug, Clone)]
pub struct AvailabilityQuery {
    pub party_size: i32,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl AvailabilityQuery {
    /// Parse and validate raw request fields
    pub fn parse(
        party_size: i32,
        date: &str,
        start_time: &str,
        end_time: &str,
    ) -> AppResult<Self> {
        if party_size < 1 {
            return Err(AppError::Validation(format!(
                "Party size must be at least 1, got {}",
                party_size
            )));
        }
        let date = time::parse_date(date)?;
        let (start, end) = time::parse_window(start_time, end_time)?;
        Ok(Self {
            party_size,
            date,
            start,
            end,
        })
    }
}

/// Half-open interval overlap: a boundary touch is not a conflict
pub fn windows_overlap(
    a_start: NaiveTime,
    a_end: NaiveTime,
    b_start: NaiveTime,
    b_end: NaiveTime,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Availability Engine - computes which tables are free for a window
#[derive(Clone)]
pub struct AvailabilityEngine {
    tables: DiningTableRepository,
    reservations: ReservationRepository,
}

impl AvailabilityEngine {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            tables: DiningTableRepository::new(db.clone()),
            reservations: ReservationRepository::new(db),
        }
    }

    /// Tables seating the party with no overlapping reservation in the window
    ///
    /// 日桶读取：只加载当天的非取消预订，再在内存里做区间判定。
    pub async fn get_available_tables(
        &self,
        query: &AvailabilityQuery,
    ) -> AppResult<Vec<DiningTable>> {
        let candidates = self.tables.find_with_capacity(query.party_size).await?;
        if candidates.is_empty() {
            return Err(AppError::NotFound(format!(
                "No table with capacity for a party of {}",
                query.party_size
            )));
        }

        let date = query.date.format("%Y-%m-%d").to_string();
        let blocking = self.reservations.find_blocking_by_date(&date).await?;

        let free = free_tables(candidates, &blocking, query.start, query.end);
        if free.is_empty() {
            return Err(AppError::NotFound(
                "No table available for the requested time slot".to_string(),
            ));
        }
        Ok(free)
    }
}

/// Drop candidates with a conflicting reservation
pub(crate) fn free_tables(
    candidates: Vec<DiningTable>,
    reservations: &[Reservation],
    start: NaiveTime,
    end: NaiveTime,
) -> Vec<DiningTable> {
    candidates
        .into_iter()
        .filter(|table| {
            let Some(table_id) = &table.id else {
                return false;
            };
            !reservations
                .iter()
                .filter(|r| &r.table_id == table_id)
                .any(|r| reservation_conflicts(r, start, end))
        })
        .collect()
}

/// Does a stored reservation overlap the requested window?
///
/// 存储的时刻在写入时已校验；万一解析失败按冲突处理（宁可少放一桌，
/// 不可重复订位），并记一条告警。
fn reservation_conflicts(reservation: &Reservation, start: NaiveTime, end: NaiveTime) -> bool {
    let parse = |s: &str| NaiveTime::parse_from_str(s, "%H:%M");
    match (
        parse(&reservation.start_time),
        parse(&reservation.end_time),
    ) {
        (Ok(r_start), Ok(r_end)) => windows_overlap(r_start, r_end, start, end),
        _ => {
            tracing::warn!(
                target: "availability",
                reservation = ?reservation.id,
                "Unparseable stored window; treating as conflicting"
            );
            true
        }
    }
}
