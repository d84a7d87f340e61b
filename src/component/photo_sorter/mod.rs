//! 照片依拍攝日期分類元件
//!
//! 掃描來源資料夾第一層的圖片檔案，依拍攝日期（EXIF 優先，否則檔案
//! 建立時間）移動到目的資料夾下的年月（YYYY-MM）子資料夾

mod batch;
mod classifier;
mod main;

pub use batch::{BatchProcessor, BatchReport, ProgressFn};
pub use classifier::{ProcessingResult, classify_file};
pub use main::PhotoSorter;
