//! Generación del informe 결과집계표.xlsx.
//!
//! - `layout`: contenido, colores, formatos y gráficos de cada hoja
//! - `writer`: volcado del layout con umya-spreadsheet
//! - `save`: guardado con sufijo `(n)` si el archivo está bloqueado, apertura automática

pub mod layout;
pub mod save;
pub mod writer;

pub use save::{open_in_default_app, save_with_retry, suffixed_path, OUTPUT_FILE_NAME};
pub use writer::{render_workbook, write_report};
