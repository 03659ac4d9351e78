macro_rules! test_println {
    ($($arg:tt)*) => {
        #[cfg(any(flapchan_trace, test))]
        if crate::util::panic::panicking() {
            // getting the thread ID while panicking doesn't seem to play super nicely with loom's
            // mock lazy_static...
            println!("[PANIC {:>17}:{:<3}] {}", file!(), line!(), format_args!($($arg)*))
        } else {
            crate::loom::traceln(format_args!(
                "[{:?} {:>17}:{:<3}] {}",
                crate::loom::thread::current().id(),
                file!(),
                line!(),
                format_args!($($arg)*),
            ));
        }
    }
}

macro_rules! test_dbg {
    ($e:expr) => {
        match $e {
            e => {
                #[cfg(any(flapchan_trace, test))]
                test_println!("{} = {:?}", stringify!($e), &e);
                e
            }
        }
    };
}
