pub(crate) use self::inner::*;

#[cfg(all(test, loom))]
mod inner {
    pub(crate) use loom::{sync, thread};
    use std::{cell::RefCell, fmt::Write};

    std::thread_local! {
        static TRACE_BUF: RefCell<String> = RefCell::new(String::new());
    }

    pub(crate) fn traceln(args: std::fmt::Arguments) {
        let mut args = Some(args);
        TRACE_BUF
            .try_with(|buf| {
                let mut buf = buf.borrow_mut();
                let _ = buf.write_fmt(args.take().unwrap());
                let _ = buf.write_char('\n');
            })
            .unwrap_or_else(|_| println!("{}", args.take().unwrap()))
    }

    pub(crate) fn model(model: impl Fn() + Sync + Send + std::panic::UnwindSafe + 'static) {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let current_iteration = std::sync::Arc::new(AtomicUsize::new(1));
        let result = {
            let current_iteration = current_iteration.clone();
            std::panic::catch_unwind(move || {
                loom::model::Builder::default().check(move || {
                    traceln(format_args!(
                        "\n---- {} iteration {} ----",
                        std::thread::current().name().unwrap_or("<unknown test>"),
                        current_iteration.fetch_add(1, Ordering::Relaxed)
                    ));

                    model();
                    // if this iteration succeeded, clear the buffer for the
                    // next iteration...
                    TRACE_BUF.with(|buf| buf.borrow_mut().clear());
                })
            })
        };

        if let Err(panic) = result {
            TRACE_BUF
                .try_with(|buf| {
                    if let Ok(buf) = buf.try_borrow() {
                        eprint!("{}", buf);
                    } else {
                        eprint!("trace buf already mutably borrowed?");
                    }
                })
                .unwrap_or_else(|e| eprintln!("trace buf already torn down: {}", e));
            eprintln!(
                "test '{}' panicked after {} iterations!",
                std::thread::current().name().unwrap_or("<unknown test>"),
                current_iteration.load(Ordering::Relaxed),
            );
            std::panic::resume_unwind(panic);
        }
    }
}

#[cfg(not(all(test, loom)))]
mod inner {
    #![allow(dead_code)]

    pub(crate) use std::thread;

    pub(crate) fn traceln(args: std::fmt::Arguments) {
        eprintln!("{}", args);
    }
}
