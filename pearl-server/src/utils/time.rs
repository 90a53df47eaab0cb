//! 时间工具函数 — 预订日期/时段解析
//!
//! 预订日期存储为 `YYYY-MM-DD`，时段端点存储为 `HH:MM`（当日内）。
//! 所有解析统一在引擎边界完成，repository 层只接收已校验的字符串。

use chrono::{NaiveDate, NaiveTime};

use super::{AppError, AppResult};

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid date format: {}", date)))
}

/// 解析时刻字符串 (HH:MM)
pub fn parse_hhmm(value: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| AppError::Validation(format!("Invalid time format: {}", value)))
}

/// 解析并校验同日半开区间 [start, end)
///
/// end 必须严格晚于 start（跨午夜的时段不支持）。
pub fn parse_window(start: &str, end: &str) -> AppResult<(NaiveTime, NaiveTime)> {
    let start_t = parse_hhmm(start)?;
    let end_t = parse_hhmm(end)?;
    if end_t <= start_t {
        return Err(AppError::Validation(format!(
            "End time {} must be after start time {}",
            end, start
        )));
    }
    Ok((start_t, end_t))
}

/// 时段长度（小时，保留两位小数）
pub fn duration_hours(start: NaiveTime, end: NaiveTime) -> f64 {
    let minutes = (end - start).num_minutes();
    (minutes as f64 / 60.0 * 100.0).round() / 100.0
}
