//! Последовательное чтение блоков MARS из файла.
//!
//! Поток читает файл блоками по 1024 байта, нормализует порядок байт,
//! классифицирует блок и отдаёт вызывающему только блоки данных на
//! каналах 0–2; всё остальное (монитор-блоки, зарезервированные каналы,
//! нераспознанный мусор) молча пропускается. Каждый открытый файл
//! использует собственный экземпляр [`MarsStream`] со своим рабочим
//! буфером; содержимое буфера действительно только до следующего вызова
//! `next_block`, что выражено временем жизни [`DataBlock`].

use std::{
    fs::File,
    io::{BufReader, ErrorKind, Read},
    path::{Path, PathBuf},
    time::SystemTime,
};

use log::{debug, trace, warn};
use mars_types::{BlockHeader, DecodedSamples, MarsError, MarsResult};

use crate::{
    decode::decode_block,
    format::{BlockHeaderExt, MARS_BLOCK_SIZE, MARS_HEADER_SIZE, MARS_MAX_CHANNELS},
    scale::{gain, scale_factor},
    swap::correct_byte_order,
};

/// Состояние потока
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// Файл открыт, блоки читаются
    Open,
    /// Достигнут конец файла (неполный хвост отброшен)
    Exhausted,
    /// Ошибка ввода/вывода, дальнейшее чтение невозможно
    Failed,
    /// Дескриптор освобождён
    Closed,
}

/// Статистика, накопленная потоком в процессе чтения.
#[derive(Debug, Default, Clone)]
pub struct ReadStats {
    /// Всего прочитано полных блоков
    pub blocks_read: u64,
    /// Пропущено блоков (монитор, чужой канал, мусор)
    pub blocks_skipped: u64,
    /// Возвращено блоков данных
    pub data_blocks: u64,
}

/// Последовательный читатель файла MARS.
pub struct MarsStream {
    reader: Option<BufReader<File>>,
    path: PathBuf,
    size: u64,
    mtime: SystemTime,
    offset: u64,
    buf: [u8; MARS_BLOCK_SIZE],
    state: StreamState,
    stats: ReadStats,
}

/// Блок данных, возвращённый потоком.
///
/// Заимствует рабочий буфер потока: все нужные данные (отсчёты, поля
/// заголовка) следует извлечь до следующего вызова `next_block`.
pub struct DataBlock<'a> {
    header: BlockHeader,
    data: &'a [u8],
}

impl MarsStream {
    /// Открывает файл, фиксируя его размер и время модификации.
    pub fn open<P: AsRef<Path>>(path: P) -> MarsResult<Self> {
        let meta = std::fs::metadata(&path)?;
        let file = File::open(&path)?;

        Ok(Self {
            reader: Some(BufReader::new(file)),
            path: path.as_ref().to_path_buf(),
            size: meta.len(),
            mtime: meta.modified()?,
            offset: 0,
            buf: [0u8; MARS_BLOCK_SIZE],
            state: StreamState::Open,
            stats: ReadStats::default(),
        })
    }

    /// Возвращает следующий блок данных или `None` на конце файла.
    ///
    /// Пропуск нераспознанных блоков — цикл, а не рекурсия: длинные серии
    /// чужих блоков не растят стек.
    pub fn next_block(&mut self) -> MarsResult<Option<DataBlock<'_>>> {
        loop {
            let reader = match self.state {
                StreamState::Open => match self.reader.as_mut() {
                    Some(r) => r,
                    None => return Err(MarsError::StreamClosed),
                },
                StreamState::Exhausted => return Ok(None),
                StreamState::Failed | StreamState::Closed => {
                    return Err(MarsError::StreamClosed)
                }
            };

            match reader.read_exact(&mut self.buf) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                    // Неполный хвост — это конец потока, а не ошибка
                    debug!(
                        "{}: EOF at offset {:#x}, {} data blocks",
                        self.path.display(),
                        self.offset,
                        self.stats.data_blocks
                    );
                    self.state = StreamState::Exhausted;
                    return Ok(None);
                }
                Err(e) => {
                    self.state = StreamState::Failed;
                    return Err(MarsError::Io(e));
                }
            }

            // Смещение растёт на блок за каждый прочитанный блок,
            // включая пропущенные — для точной диагностики по файлу
            let block_offset = self.offset;
            self.offset += MARS_BLOCK_SIZE as u64;
            self.stats.blocks_read += 1;

            correct_byte_order(&mut self.buf);

            let header = match BlockHeader::parse(&self.buf) {
                Ok(h) => h,
                Err(MarsError::UnrecognizedFormat { magic, block_format }) => {
                    debug!(
                        "{}: unrecognized block at {:#x} (magic {:#06x}, format {})",
                        self.path.display(),
                        block_offset,
                        magic,
                        block_format
                    );
                    self.stats.blocks_skipped += 1;
                    continue;
                }
                Err(e) => {
                    return Err(e);
                }
            };

            if !header.block_format().is_data() || header.channel() >= MARS_MAX_CHANNELS {
                trace!(
                    "{}: skip {:?} chan {} at {:#x}",
                    self.path.display(),
                    header.block_format(),
                    header.channel(),
                    block_offset
                );
                self.stats.blocks_skipped += 1;
                continue;
            }

            self.stats.data_blocks += 1;
            return Ok(Some(DataBlock {
                header,
                data: &self.buf[MARS_HEADER_SIZE..],
            }));
        }
    }

    /// Освобождает файловый дескриптор; повторный вызов безвреден.
    pub fn close(&mut self) {
        self.reader = None;
        self.state = StreamState::Closed;
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    /// Байтовое смещение в файле сразу за последним прочитанным блоком
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Размер файла, зафиксированный при открытии
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Время модификации файла, зафиксированное при открытии
    pub fn mtime(&self) -> SystemTime {
        self.mtime
    }

    pub fn stats(&self) -> &ReadStats {
        &self.stats
    }
}

impl DataBlock<'_> {
    pub fn header(&self) -> &BlockHeader {
        &self.header
    }

    /// Декодирует блок в отсчёты с масштабом и коэффициентом усиления.
    pub fn decode(&self) -> MarsResult<DecodedSamples> {
        let encoding = self.header.effective_encoding()?;
        let samples = decode_block(&self.header, self.data)?;

        Ok(DecodedSamples {
            samples,
            scale: scale_factor(encoding, self.header.scale())?,
            gain: gain(encoding, self.header.scale())?,
        })
    }

    pub fn station_code(&self) -> String {
        self.header.station_code()
    }

    pub fn station_serial(&self) -> i32 {
        self.header.station_serial()
    }

    pub fn channel(&self) -> u8 {
        self.header.channel()
    }

    /// Время начала блока в секундах epoch
    pub fn timestamp(&self) -> i64 {
        self.header.timestamp()
    }

    pub fn sample_rate_hz(&self) -> f64 {
        self.header.sample_rate_hz()
    }

    pub fn sample_interval_ms(&self) -> u32 {
        self.header.sample_interval_ms()
    }

    pub fn max_amplitude(&self) -> i16 {
        self.header.max_amplitude()
    }

    /// Целочисленный масштаб блока без декодирования данных
    pub fn scale_factor(&self) -> MarsResult<i32> {
        scale_factor(self.header.effective_encoding()?, self.header.scale())
    }

    /// Коэффициент усиления блока без декодирования данных
    pub fn gain(&self) -> MarsResult<f64> {
        gain(self.header.effective_encoding()?, self.header.scale())
    }

    /// Однострочное описание блока для диагностики
    pub fn describe(&self) -> String {
        format!(
            "sta='{}' chan={} format={:?} samp={}ms scale={} time={} maxamp={}",
            self.station_code(),
            self.channel(),
            self.header.block_format(),
            self.sample_interval_ms(),
            self.header.scale(),
            self.timestamp(),
            self.max_amplitude(),
        )
    }
}

/// Convenience: декодирует все блоки данных файла в вектор.
///
/// Блоки с неподдерживаемой кодировкой пропускаются с предупреждением;
/// ошибки ввода/вывода прерывают чтение.
pub fn decode_all_blocks(stream: &mut MarsStream) -> MarsResult<Vec<DecodedSamples>> {
    let mut decoded = Vec::new();

    while let Some(block) = stream.next_block()? {
        match block.decode() {
            Ok(samples) => decoded.push(samples),
            Err(MarsError::UnsupportedEncoding(v)) => {
                warn!("skipping block with unsupported data format {v}");
            }
            Err(e) => return Err(e),
        }
    }

    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_file_is_io_error() {
        let result = MarsStream::open("/nonexistent/path/data.mars");
        assert!(matches!(result, Err(MarsError::Io(_))));
    }

    #[test]
    fn test_closed_stream_rejects_reads() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let mut stream = MarsStream::open(tmp.path()).unwrap();
        assert_eq!(stream.state(), StreamState::Open);

        stream.close();
        stream.close(); // идемпотентно
        assert_eq!(stream.state(), StreamState::Closed);
        assert!(matches!(
            stream.next_block(),
            Err(MarsError::StreamClosed)
        ));
    }

    #[test]
    fn test_empty_file_exhausts_immediately() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let mut stream = MarsStream::open(tmp.path()).unwrap();

        assert!(stream.next_block().unwrap().is_none());
        assert_eq!(stream.state(), StreamState::Exhausted);
        assert_eq!(stream.offset(), 0);

        // Повторный вызов после EOF остаётся EOF
        assert!(stream.next_block().unwrap().is_none());
    }
}
