use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TtlinkerError {
    InvalidInput(String),
    NotFound(String),
    AliasInUse(String),
    CapacityExhausted(String),
    Config(String),
    Io(String),
}

impl TtlinkerError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            TtlinkerError::InvalidInput(_) => "E001",
            TtlinkerError::NotFound(_) => "E002",
            TtlinkerError::AliasInUse(_) => "E003",
            TtlinkerError::CapacityExhausted(_) => "E004",
            TtlinkerError::Config(_) => "E005",
            TtlinkerError::Io(_) => "E006",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            TtlinkerError::InvalidInput(_) => "Invalid Input",
            TtlinkerError::NotFound(_) => "Alias Not Found",
            TtlinkerError::AliasInUse(_) => "Alias In Use",
            TtlinkerError::CapacityExhausted(_) => "Alias Capacity Exhausted",
            TtlinkerError::Config(_) => "Configuration Error",
            TtlinkerError::Io(_) => "I/O Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            TtlinkerError::InvalidInput(msg) => msg,
            TtlinkerError::NotFound(msg) => msg,
            TtlinkerError::AliasInUse(msg) => msg,
            TtlinkerError::CapacityExhausted(msg) => msg,
            TtlinkerError::Config(msg) => msg,
            TtlinkerError::Io(msg) => msg,
        }
    }

    /// HTTP 状态码映射（供 API 层使用）
    pub fn http_status(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            TtlinkerError::InvalidInput(_) | TtlinkerError::AliasInUse(_) => {
                StatusCode::BAD_REQUEST
            }
            TtlinkerError::NotFound(_) => StatusCode::NOT_FOUND,
            TtlinkerError::CapacityExhausted(_) => StatusCode::SERVICE_UNAVAILABLE,
            TtlinkerError::Config(_) | TtlinkerError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 格式化为彩色输出（用于 Server 模式启动失败）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for TtlinkerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for TtlinkerError {}

// 便捷的构造函数
impl TtlinkerError {
    pub fn invalid_input<T: Into<String>>(msg: T) -> Self {
        TtlinkerError::InvalidInput(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        TtlinkerError::NotFound(msg.into())
    }

    pub fn alias_in_use<T: Into<String>>(msg: T) -> Self {
        TtlinkerError::AliasInUse(msg.into())
    }

    pub fn capacity_exhausted<T: Into<String>>(msg: T) -> Self {
        TtlinkerError::CapacityExhausted(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        TtlinkerError::Config(msg.into())
    }

    pub fn io<T: Into<String>>(msg: T) -> Self {
        TtlinkerError::Io(msg.into())
    }
}

impl From<std::io::Error> for TtlinkerError {
    fn from(err: std::io::Error) -> Self {
        TtlinkerError::Io(err.to_string())
    }
}

impl From<config::ConfigError> for TtlinkerError {
    fn from(err: config::ConfigError) -> Self {
        TtlinkerError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for TtlinkerError {
    fn from(err: toml::ser::Error) -> Self {
        TtlinkerError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TtlinkerError>;
