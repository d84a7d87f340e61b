//! 程式初始化

use env_logger::Env;

/// 初始化日誌系統，預設只輸出警告以免干擾互動介面（RUST_LOG 可覆寫）
pub fn init() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
}
