//! Декодер блоков сейсмических регистраторов MARS-88 и MARSlite.
//!
//! Файл MARS — плотная последовательность 1024-байтовых блоков: 24 байта
//! заголовка (вариант выбирается тегом формата) и 500 16-битных слов
//! данных в одной из шести кодировок, включая дифференциальную. Крейт
//! классифицирует блоки, приводит их к порядку байт хоста, декодирует
//! отсчёты и вычисляет масштаб/усиление; сборка трасс и выходные форматы
//! остаются за вызывающим.
//!
//! # Быстрый старт
//!
//! ```no_run
//! use mars_core::MarsStream;
//!
//! let mut stream = MarsStream::open("station.mars")?;
//! while let Some(block) = stream.next_block()? {
//!     let decoded = block.decode()?;
//!     println!(
//!         "{}: {} samples, gain {}",
//!         block.describe(),
//!         decoded.len(),
//!         decoded.gain
//!     );
//! }
//! # Ok::<(), mars_types::MarsError>(())
//! ```

pub mod binary;
pub mod decode;
pub mod format;
pub mod scale;
pub mod stream;
pub mod swap;

pub use decode::*;
pub use format::*;
pub use scale::*;
pub use stream::*;
pub use swap::*;

/// Версия библиотеки.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
