/* 3rd party libraries */
use clap::{Arg, Command};
use log::info;

/* Custom libraries */
use config::LiftConfig;
use lift::Lift;

/* Modules */
mod config;
mod console;
mod lift;
mod shared;

/// The console maps 'a'/'A' to this floor.
const FIRST_FLOOR: u8 = 1;

/* Main */
fn main() {
    env_logger::init();
    info!("program started");

    let matches = Command::new("liftsim")
        .about("Single elevator car simulator driven from the console")
        .after_help(
            "Console keys:\n  \
             a-z  call from outside to a floor (a = first floor)\n  \
             A-Z  call from inside the cabin (A = first floor)\n  \
             ?    print the current car state as JSON\n  \
             =    exit\n",
        )
        .arg(
            Arg::new("top_floor")
                .help("Top floor number (the first floor is 1)")
                .required(true)
                .value_parser(clap::value_parser!(u8)),
        )
        .arg(
            Arg::new("floor_height")
                .help("Height of one floor in meters")
                .required(true)
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("speed")
                .help("Car speed in meters per second")
                .required(true)
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("door_hold")
                .help("Door open time in seconds")
                .required(true)
                .value_parser(clap::value_parser!(f64)),
        )
        .get_matches();

    let top_floor = *matches.get_one::<u8>("top_floor").unwrap();
    let floor_height = *matches.get_one::<f64>("floor_height").unwrap();
    let speed = *matches.get_one::<f64>("speed").unwrap();
    let door_hold = *matches.get_one::<f64>("door_hold").unwrap();

    let lift_config = unwrap_or_exit!(LiftConfig::new(
        FIRST_FLOOR,
        top_floor,
        floor_height,
        speed,
        door_hold
    ));

    install_signal_handlers();

    let lift = Lift::new(&lift_config);
    console::run(&lift);

    // Dropping the handle stops and joins the control loop.
    drop(lift);
    info!("program finished");
}

/***************************************/
/*          Signal handling            */
/***************************************/
#[cfg(unix)]
extern "C" fn handle_signal(signal: libc::c_int) {
    // Async-signal context: bypass the logger. The control loop thread is
    // abandoned; this is an abrupt exit, not a shutdown.
    eprintln!("signal received: {}", signal);
    std::process::exit(2);
}

#[cfg(unix)]
fn install_signal_handlers() {
    let handler = handle_signal as extern "C" fn(libc::c_int);
    unsafe {
        libc::signal(libc::SIGINT, handler as libc::sighandler_t);
        libc::signal(libc::SIGTERM, handler as libc::sighandler_t);
    }
}

#[cfg(not(unix))]
fn install_signal_handlers() {}
