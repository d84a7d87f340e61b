use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 建立 Ctrl-C 中斷訊號
///
/// 批次處理會在排入新檔案前檢查這個旗標，執行中的檔案照常跑完。
#[must_use]
pub fn setup_shutdown_signal() -> Arc<AtomicBool> {
    let shutdown_signal = Arc::new(AtomicBool::new(false));
    let signal_clone = Arc::clone(&shutdown_signal);

    ctrlc::set_handler(move || {
        signal_clone.store(true, Ordering::SeqCst);
        eprintln!("\n收到中斷信號，不再排入新的檔案任務...");
    })
    .expect("無法設定 Ctrl-C 處理器");

    shutdown_signal
}
