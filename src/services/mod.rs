pub mod dashboard;
pub mod signals;

pub use dashboard::DashboardService;
