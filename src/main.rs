use std::process::ExitCode;

use clap::Parser;
use sensor_params::{
    args::{convert_filter, usage_status, Args},
    resolve_standard, Resolution,
};
use tracing::{error, info};

fn print_report(res: &Resolution) {
    let radio = &res.radio;
    let psd = &res.psd;
    let ring = &res.ring;
    println!(
        "radio: center {} Hz, rate {} Hz, amp {}, lna {} dB, vga {} dB, ppm {}",
        radio.center_freq,
        radio.sample_rate,
        if radio.amp_enabled { "on" } else { "off" },
        radio.lna_gain,
        radio.vga_gain,
        radio.ppm_error
    );
    println!(
        "psd:   {} window, nperseg {}, noverlap {} (achieved rbw {:.3} Hz)",
        psd.window_type,
        psd.nperseg,
        psd.noverlap,
        res.achieved_rbw()
    );
    println!(
        "ring:  {} bytes per second, {} byte ring ({} samples)",
        ring.total_bytes,
        ring.rb_size,
        ring.capacity_samples()
    );
}

fn run(args: &Args) -> sensor_params::Result<()> {
    let desired = args.desired_spec()?;
    info!(?desired, "Resolving acquisition parameters");
    let resolution = resolve_standard(&desired)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&resolution)?);
    } else {
        print_report(&resolution);
    }
    if let Some(output) = &args.hackrf_output {
        println!(
            "hackrf_transfer {}",
            resolution.radio.hackrf_transfer_args(output).join(" ")
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    // Get CLI args
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(usage_status(&e) as u8);
        }
    };

    // Set the log level
    tracing_subscriber::fmt()
        .with_max_level(convert_filter(args.verbose.log_level_filter()))
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::from(e.status_code() as u8)
        }
    }
}
