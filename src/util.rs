pub(crate) mod mutex;

#[cfg(any(flapchan_trace, test))]
pub(crate) mod panic {
    pub(crate) fn panicking() -> bool {
        std::thread::panicking()
    }
}
