//! Чтение многобайтовых полей из сырого блока.
//!
//! Все поля читаются в порядке байт хоста: к моменту разбора блок уже
//! нормализован байт-свопом (см. [`crate::swap`]).

use byteorder::{ByteOrder, NativeEndian};

pub fn read_u16_at(buf: &[u8], off: usize) -> u16 {
    NativeEndian::read_u16(&buf[off..off + 2])
}

pub fn read_i16_at(buf: &[u8], off: usize) -> i16 {
    NativeEndian::read_i16(&buf[off..off + 2])
}

pub fn read_i32_at(buf: &[u8], off: usize) -> i32 {
    NativeEndian::read_i32(&buf[off..off + 4])
}
