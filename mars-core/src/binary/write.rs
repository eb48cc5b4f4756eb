//! Запись многобайтовых полей в сырой блок (порядок байт хоста).
//!
//! Файлы MARS пишутся в порядке байт регистратора; сериализатор здесь
//! эмулирует регистратор, работающий на текущем хосте.

use byteorder::{ByteOrder, NativeEndian};

pub fn write_u16_at(buf: &mut [u8], off: usize, val: u16) {
    NativeEndian::write_u16(&mut buf[off..off + 2], val);
}

pub fn write_i16_at(buf: &mut [u8], off: usize, val: i16) {
    NativeEndian::write_i16(&mut buf[off..off + 2], val);
}

pub fn write_i32_at(buf: &mut [u8], off: usize, val: i32) {
    NativeEndian::write_i32(&mut buf[off..off + 4], val);
}
