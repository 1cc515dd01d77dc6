//! `initseed` - command-line front end for the seed search engine

mod args;

use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use clap::Parser;
use initseed_core::calendar::{date_codes, DateEntry};
use initseed_core::compression::SeedPolicy;
use initseed_core::mt::IvsCode;
use initseed_core::profile::TargetProfile;
use initseed_core::search::{scan_ivs_codes, PostProcessPath, SearchReport, SeedSearch};
use log::info;

use args::{Cli, Command, DateRange};

fn load_profile(path: &Path) -> anyhow::Result<TargetProfile> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading profile {}", path.display()))?;
    let profile = TargetProfile::from_json(&json)?;
    info!("loaded profile {:?} from {}", profile.name, path.display());
    Ok(profile)
}

/// Resolve a `--from`/`--days` pair against the date table
fn select_dates(range: &DateRange) -> anyhow::Result<Vec<DateEntry>> {
    let dates = date_codes();
    let Some(first) = dates.iter().position(|d| d.to_string() == range.from) else {
        bail!("{} is not a date between 2000-01-01 and 2099-12-31", range.from);
    };
    let end = match range.days {
        Some(days) => first.saturating_add(days).min(dates.len()),
        None => dates.len(),
    };
    Ok(dates[first..end].to_vec())
}

fn search<const W: usize>(
    profile: &TargetProfile,
    target: u64,
    policy: SeedPolicy,
    dates: &[DateEntry],
    sequential: bool,
) -> anyhow::Result<SearchReport> {
    let params = profile.params()?;
    let mut engine = SeedSearch::<W>::new(&params);
    let matches = if sequential {
        engine.find(target, policy, dates)
    } else {
        engine.find_parallel(target, policy, dates)
    };

    Ok(SearchReport {
        profile: profile.fingerprint()?,
        policy,
        target,
        dates_scanned: dates.len(),
        matches,
    })
}

fn checksum<const W: usize>(
    profile: &TargetProfile,
    dates: &[DateEntry],
    path: PostProcessPath,
) -> anyhow::Result<u64> {
    let search = SeedSearch::<W>::new(&profile.params()?);
    Ok(search.checksum_parallel(dates, path))
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let width = cli.width;
    match cli.command {
        Command::Search {
            profile,
            target,
            policy,
            range,
            sequential,
        } => {
            let profile = load_profile(&profile)?;
            let dates = select_dates(&range)?;
            let policy = SeedPolicy::from(policy);
            let report = match width {
                1 => search::<1>(&profile, target, policy, &dates, sequential)?,
                4 => search::<4>(&profile, target, policy, &dates, sequential)?,
                8 => search::<8>(&profile, target, policy, &dates, sequential)?,
                other => bail!("unsupported lane width {other}"),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Command::Checksum {
            profile,
            path,
            range,
        } => {
            let profile = load_profile(&profile)?;
            let dates = select_dates(&range)?;
            let path = PostProcessPath::from(path);
            let sum = match width {
                1 => checksum::<1>(&profile, &dates, path)?,
                4 => checksum::<4>(&profile, &dates, path)?,
                8 => checksum::<8>(&profile, &dates, path)?,
                other => bail!("unsupported lane width {other}"),
            };
            println!("{sum}");
        }

        Command::IvsScan {
            start,
            count,
            offset,
            target,
        } => {
            if target > IvsCode::PERFECT.raw() {
                bail!("IV code {target:#x} uses more than 30 bits");
            }
            let target = IvsCode::new(target);
            let offset = offset.into();
            let hits = match width {
                1 => scan_ivs_codes::<1>(start, count, offset, target),
                4 => scan_ivs_codes::<4>(start, count, offset, target),
                8 => scan_ivs_codes::<8>(start, count, offset, target),
                other => bail!("unsupported lane width {other}"),
            };
            println!("{hits}");
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("initseed: {e:#}");
        std::process::exit(1);
    }
}
