use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Input has no header row")]
    MissingHeaderError,

    #[error("Invalid argument '{field}': {reason}")]
    InvalidArgumentError { field: String, reason: String },
}

/// 錯誤分類，決定退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 輸入資料格式錯誤
    Input,
    /// 讀寫串流失敗 (例如 stdout 管道已關閉)
    Io,
    /// 命令列參數錯誤
    Configuration,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::CsvError(e) => match e.kind() {
                csv::ErrorKind::Io(_) => ErrorCategory::Io,
                _ => ErrorCategory::Input,
            },
            EtlError::IoError(_) => ErrorCategory::Io,
            EtlError::MissingHeaderError => ErrorCategory::Input,
            EtlError::InvalidArgumentError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Input => 1,
            ErrorCategory::Io => 2,
            ErrorCategory::Configuration => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::CsvError(e) => match e.kind() {
                csv::ErrorKind::UnequalLengths {
                    pos,
                    expected_len,
                    len,
                } => {
                    let line = pos.as_ref().map(|p| p.line()).unwrap_or(0);
                    format!(
                        "Malformed CSV at line {}: expected {} fields, found {}",
                        line, expected_len, len
                    )
                }
                csv::ErrorKind::Utf8 { .. } => "Input contains invalid UTF-8".to_string(),
                _ => format!("Failed to process CSV: {}", e),
            },
            EtlError::IoError(e) => format!("Failed to read or write stream: {}", e),
            EtlError::MissingHeaderError => "Input is empty, a header row is required".to_string(),
            EtlError::InvalidArgumentError { field, reason } => {
                format!("Invalid argument {}: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => {
                "Check that the input is comma-separated with a header and the same number of fields on every row"
            }
            ErrorCategory::Io => "Check that the output pipe or file is still open",
            ErrorCategory::Configuration => "Run with --help to see the accepted options",
        }
    }

    /// 記錄錯誤並以對應退出碼結束程序
    pub fn report_and_exit(&self) -> ! {
        tracing::error!(
            "❌ Pipeline failed: {} (Category: {:?})",
            self,
            self.category()
        );
        tracing::error!("💡 Recovery suggestion: {}", self.recovery_suggestion());
        eprintln!("❌ {}", self.user_friendly_message());
        std::process::exit(self.exit_code());
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
