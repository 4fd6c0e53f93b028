use tracing::{error, info};

pub enum LogServiceType {
    Register,
    Database,
    Other
}
impl LogServiceType {
    fn as_str(&self) -> &'static str {
        match self {
            LogServiceType::Register => "REGISTER",
            LogServiceType::Database => "DATABASE",
            LogServiceType::Other => "OTHER"
        }
    }
}

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_target(false)
        .try_init();
}

pub fn log_info(service: LogServiceType, message: String) {
    info!(service = service.as_str(), "{}", message)
}

pub fn log_error(service: LogServiceType, message: String) {
    error!(service = service.as_str(), "{}", message)
}
