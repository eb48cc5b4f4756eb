//! Приведение блока к порядку байт хоста.
//!
//! Магическое число, прочитанное как u16 хоста, различает два случая:
//! [`crate::format::MAGIC_NATIVE`] — порядок файла совпадает с хостом,
//! блок не трогаем;
//! [`MAGIC_SWAPPED`] — порядок противоположный, и каждое многобайтовое
//! поле заголовка и каждое слово данных переворачивается по отдельности.
//! Поля заголовка разной ширины, поэтому свопить буфер целиком нельзя —
//! набор полей зависит от варианта заголовка. Сами байты магического
//! числа не переворачиваются: классификатор принимает оба значения, а
//! операция за счёт этого остаётся инволютивной.

use mars_types::BlockFormat;

use crate::format::{read_magic, MAGIC_SWAPPED, MARS_BLOCK_SAMPLES, MARS_BLOCK_SIZE, MARS_HEADER_SIZE};

fn swap16_at(buf: &mut [u8], off: usize) {
    buf.swap(off, off + 1);
}

fn swap32_at(buf: &mut [u8], off: usize) {
    buf[off..off + 4].reverse();
}

/// Безусловно переворачивает все многобайтовые поля блока.
///
/// Возвращает false для неизвестного тега формата: без варианта заголовка
/// неизвестно, какие байты являются полями, и блок остаётся как есть.
/// Также используется генераторами фикстур для получения блока
/// «чужого» порядка байт из нативного.
pub fn swap_block(buf: &mut [u8; MARS_BLOCK_SIZE]) -> bool {
    let Some(format) = BlockFormat::from_u8(buf[2]) else {
        return false;
    };

    if format.is_m88() {
        swap32_at(buf, 4); // device_id
        swap32_at(buf, 8); // time
        swap16_at(buf, 12); // time_lag_ms
        swap16_at(buf, 14); // sync_mode
        swap16_at(buf, 18); // max_amplitude
    } else {
        swap32_at(buf, 12); // time
        swap16_at(buf, 18); // max_amplitude
        swap16_at(buf, 22); // diff_start
    }

    for i in 0..MARS_BLOCK_SAMPLES {
        swap16_at(buf, MARS_HEADER_SIZE + 2 * i);
    }

    true
}

/// Нормализует блок к порядку байт хоста, если магическое число
/// указывает на противоположный порядок.
///
/// Возвращает true, если своп был выполнен.
pub fn correct_byte_order(buf: &mut [u8; MARS_BLOCK_SIZE]) -> bool {
    if read_magic(buf) != MAGIC_SWAPPED {
        return false;
    }
    swap_block(buf)
}
