//! 服务模块
//!
//! - [`audit`] - 审计日志落库（fire-and-forget）
//! - [`notification`] - 预订确认与经理站内通知（尽力而为）

pub mod audit;
pub mod notification;

pub use audit::AuditService;
pub use notification::{ConfirmationSender, LogConfirmationSender, NotificationService};
