//! 信号处理函数中使用的输出，不分配内存，只调用 write(2)

fn write_stdout(bytes: &[u8]) {
    let mut rest = bytes;
    while !rest.is_empty() {
        let n = unsafe { libc::write(libc::STDOUT_FILENO, rest.as_ptr().cast(), rest.len()) };
        if n <= 0 {
            return;
        }
        rest = &rest[n as usize..];
    }
}

/// 把非负整数格式化到栈上的缓冲区
fn format_number(value: i32, buf: &mut [u8; 12]) -> &[u8] {
    let mut n = value.unsigned_abs();
    let mut pos = buf.len();
    loop {
        pos -= 1;
        buf[pos] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    if value < 0 {
        pos -= 1;
        buf[pos] = b'-';
    }
    &buf[pos..]
}

pub fn write_signal_goodbye(signo: i32) {
    let mut buf = [0u8; 12];
    write_stdout(b"\nMain screen exited due to signal ");
    write_stdout(format_number(signo, &mut buf));
    write_stdout(b". Goodbye!\n");
}
