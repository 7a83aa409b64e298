/***************************************/
/*               Macros                */
/***************************************/
#[macro_export]
macro_rules! unwrap_or_exit {
    ($expr:expr) => {
        match $expr {
            Ok(val) => val,
            Err(e) => {
                log::error!("ERROR: {}", e);
                eprintln!("run `liftsim --help` for parameters and console keys");
                std::process::exit(1);
            }
        }
    };
}
