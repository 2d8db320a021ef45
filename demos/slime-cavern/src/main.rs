use slime_cavern::{run_scripted, DEMO_SCRIPT};

const FRAME_RATES: [f32; 3] = [30.0, 60.0, 144.0];
const TICKS: u64 = 75;

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let mut outcomes = Vec::new();
    for fps in FRAME_RATES {
        match run_scripted(fps, &DEMO_SCRIPT, TICKS) {
            Ok(outcome) => {
                log::info!(
                    "{:>5} FPS: {:?}, {} events, actors {:?}",
                    fps,
                    outcome.session,
                    outcome.events.len(),
                    outcome.actors
                );
                outcomes.push(outcome);
            }
            Err(err) => {
                log::error!("failed to load cavern: {}", err);
                std::process::exit(1);
            }
        }
    }

    let agree = outcomes.windows(2).all(|pair| pair[0] == pair[1]);
    if agree {
        log::info!("all frame rates agree after {} ticks", TICKS);
    } else {
        log::error!("frame rates disagree");
        std::process::exit(1);
    }
}
