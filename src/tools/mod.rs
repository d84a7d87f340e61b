mod date_extractor;
mod dest_resolver;
mod image_scanner;
mod path_validator;

pub use date_extractor::extract_capture_date;
pub use dest_resolver::{ensure_month_folder, month_folder_name};
pub use image_scanner::{IMAGE_EXTENSIONS, is_image_file, scan_image_files};
pub use path_validator::validate_directory_exists;
