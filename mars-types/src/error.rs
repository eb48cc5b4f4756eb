use thiserror::Error;

use crate::SampleEncoding;

/// Результат для операций MARS
pub type MarsResult<T> = std::result::Result<T, MarsError>;

/// Типы ошибок при чтении и декодировании блоков MARS.
#[derive(Debug, Error)]
pub enum MarsError {
    /// Ошибки ввода/вывода (автоконвертируются из std::io::Error)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Неизвестное магическое число или тег формата блока.
    /// Внутри потока такой блок пропускается, а не считается фатальным.
    #[error("Unrecognized block: magic {magic:#06x}, block format {block_format}")]
    UnrecognizedFormat { magic: u16, block_format: u8 },

    /// Тег формата данных вне диапазона 0..=5.
    /// Фатально для декодирования одного блока, поток остаётся читаемым.
    #[error("Unsupported data format: {0}")]
    UnsupportedEncoding(u8),

    /// Поле scale заголовка даёт нулевой или невычислимый масштаб
    #[error("Invalid scale {header_scale} for {encoding:?}")]
    InvalidScale {
        encoding: SampleEncoding,
        header_scale: u8,
    },

    /// Чтение из закрытого или аварийно завершённого потока
    #[error("Stream is closed")]
    StreamClosed,
}
