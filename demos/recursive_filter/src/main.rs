use std::time::Instant;

use argh::FromArgs;
use rand::Rng;

use recfilter::metrics::max_error;
use recfilter::parallel::ExecutionStrategy;
use recfilter::pipeline::BlockedFilter;
use recfilter::recurrence::{FirstOrder, RecursiveFilter, SecondOrder};
use recfilter::sequential;
use recfilter_image::{Image, ImageSize};

#[derive(FromArgs)]
/// Compare the sequential and blocked recursive filters on a random image
struct Args {
    /// image width
    #[argh(option, default = "4096")]
    width: usize,

    /// image height
    #[argh(option, default = "4096")]
    height: usize,

    /// filter order, 1 or 2
    #[argh(option, default = "1")]
    order: usize,

    /// tile length along the scan dimension
    #[argh(option, default = "recfilter::pipeline::DEFAULT_BLOCK_SIZE")]
    block_size: usize,

    /// number of repeated blocked runs to time
    #[argh(option, default = "100")]
    repeats: usize,

    /// run the blocked pipeline serially instead of in parallel
    #[argh(switch)]
    serial: bool,
}

fn run<F: RecursiveFilter>(args: &Args, filter: &F) -> Result<(), Box<dyn std::error::Error>> {
    let size = ImageSize {
        width: args.width,
        height: args.height,
    };
    let num_pixels = size.width * size.height;

    log::info!("generating random input image ({}x{})", size.width, size.height);

    let mut rng = rand::rng();
    let data = (0..num_pixels).map(|_| rng.random::<f32>()).collect();
    let input = Image::<f32, 1>::new(size, data)?;

    log::info!("computing the sequential reference, forward and reverse on rows and columns");

    let mut reference = input.clone();
    let start = Instant::now();
    sequential::filter_2d_inplace(&mut reference, filter);
    let elapsed = start.elapsed().as_secs_f64();
    log::info!(
        "sequential: {:.2} ms ({:.2} Mpix/s)",
        elapsed * 1e3,
        num_pixels as f64 / elapsed / 1e6
    );

    let strategy = if args.serial {
        ExecutionStrategy::Serial
    } else {
        ExecutionStrategy::Parallel
    };
    let blocked = BlockedFilter::new(args.block_size).with_strategy(strategy);

    log::info!(
        "computing the blocked pipeline, block size {}, {} repeats",
        args.block_size,
        args.repeats
    );

    let mut output = Image::<f32, 1>::zeros(size)?;
    let start = Instant::now();
    for _ in 0..args.repeats {
        blocked.filter_2d(&input, &mut output, filter)?;
    }
    let elapsed = start.elapsed().as_secs_f64();
    log::info!(
        "blocked: {:.2} ms/run ({:.2} Mpix/s)",
        elapsed * 1e3 / args.repeats as f64,
        (num_pixels * args.repeats) as f64 / elapsed / 1e6
    );

    let (max_abs, max_rel) = max_error(reference.as_slice(), output.as_slice())?;
    log::info!("maximum relative error: {max_rel:e} ; maximum error: {max_abs:e}");

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();

    match args.order {
        1 => {
            let filter = FirstOrder {
                b0: 1.26795,
                a1: -0.26795,
            };
            log::info!(
                "recursive filter: y_i = b0 * x_i - a1 * y_(i-1) with b0 = {} ; a1 = {}",
                filter.b0,
                filter.a1
            );
            run(&args, &filter)
        }
        2 => {
            let filter = SecondOrder {
                b0: 0.992817,
                a1: -0.00719617,
                a2: 1.29475e-05,
            };
            log::info!(
                "recursive filter: y_i = b0 * x_i - a1 * y_(i-1) - a2 * y_(i-2) with b0 = {} ; a1 = {} ; a2 = {}",
                filter.b0,
                filter.a1,
                filter.a2
            );
            run(&args, &filter)
        }
        other => Err(format!("unsupported filter order: {other}").into()),
    }
}
