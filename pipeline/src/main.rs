//! Dataset pipeline CLI: wires region cataloguing, event ingestion,
//! spatial/temporal matching, association resolution, window slicing and
//! split partitioning into one run (spec.md §2/§5).

mod cli;
mod ingest;
mod output;
mod summary;

use anyhow::Result;
use clap::Parser;
use cli::{Args, FlareSourceArg, ImagePolicyArg};
use std::sync::Arc;
use store::{PipelineContext, PipelineParams, RegionPopulation};
use summary::RunSummary;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level.to_string())))
        .init();

    info!("{}", "=".repeat(60));
    info!("Active-region / eruptive-event dataset builder");
    info!("{}", "=".repeat(60));

    let params = PipelineParams {
        obs_len_h: args.obs_len_h,
        step_h: args.step_h,
        strict: args.strict,
        population: RegionPopulation::OnDisk,
        splits: args.splits,
    };
    let ctx = PipelineContext::new(params);
    let mut summary = RunSummary::default();

    info!("loading catalogues");
    let raw_inputs = ingest::load_region_series(&args.region_series_dir)?;
    let legacy_map = ingest::load_region_mapping(&args.region_mapping)?;
    let cmes = ingest::load_cmes(&args.cme_catalogue)?;
    let dimmings = ingest::load_dimmings(&args.dimming_catalogue)?;
    let flares = match args.flare_source {
        FlareSourceArg::External => {
            let path = args.flare_catalogue.as_deref().expect("clap enforces --flare-catalogue for external source");
            ingest::load_flares(path)?
        }
        FlareSourceArg::EmbeddedPerRegion => ingest::load_embedded_flares(&raw_inputs)?,
    };
    summary.n_cmes_loaded = cmes.len();
    summary.n_dimmings_loaded = dimmings.len();
    summary.n_flares_loaded = flares.len();

    info!(regions = raw_inputs.len(), "stage B: building region catalogue");
    region_catalog::build_catalog(&ctx, raw_inputs, &legacy_map).await?;

    let (earliest_start, latest_end) = {
        let regions = ctx.tables.regions.lock().unwrap();
        (regions.earliest_start(), regions.latest_end())
    };
    let (Some(earliest_start), Some(latest_end)) = (earliest_start, latest_end) else {
        anyhow::bail!("region catalogue produced no regions");
    };

    let eligible_cmes: Vec<store::Cme> = event_catalog::eligible_cmes(&cmes, earliest_start, latest_end).into_iter().cloned().collect();
    summary.n_cmes_eligible = eligible_cmes.len();
    info!(loaded = cmes.len(), eligible = eligible_cmes.len(), "stage C: CME mask applied");

    {
        let mut cme_table = ctx.tables.cmes.lock().unwrap();
        cme_table.truncate();
        for cme in &eligible_cmes {
            cme_table.insert(cme.cme_id, cme.detection_ts, cme.clone());
        }
        let mut dimming_table = ctx.tables.dimmings.lock().unwrap();
        dimming_table.truncate();
        for d in &dimmings {
            dimming_table.insert(d.dimming_id, d.ts, d.clone());
        }
        let mut flare_table = ctx.tables.flares.lock().unwrap();
        flare_table.truncate();
        for f in &flares {
            flare_table.insert(f.flare_id, f.ts, f.clone());
        }
    }

    info!("stage D: spatial/temporal matching");
    let (spatial_rows, dimming_matches, flare_matches) = {
        let regions = ctx.tables.regions.lock().unwrap();
        let bbox = ctx.tables.processed_bbox.lock().unwrap();

        let spatial_rows: Vec<_> = eligible_cmes.iter().flat_map(|cme| event_matcher::match_cme(cme, &regions, &bbox)).collect();
        let dimming_matches: Vec<_> = dimmings.iter().filter_map(|d| event_matcher::match_dimming(d, &regions, &bbox)).collect();
        let flare_matches: Vec<_> = flares.iter().filter_map(|f| event_matcher::match_flare(f, &regions, &bbox)).collect();
        (spatial_rows, dimming_matches, flare_matches)
    };
    summary.n_spatial_candidates = spatial_rows.len();
    summary.n_dimming_matches = dimming_matches.len();
    summary.n_flare_matches = flare_matches.len();

    {
        let mut spatial_table = ctx.tables.spatial_consistency.lock().unwrap();
        spatial_table.truncate();
        for row in spatial_rows {
            spatial_table.push(row);
        }
        let mut events_table = ctx.tables.region_events.lock().unwrap();
        events_table.truncate();
        for m in dimming_matches.into_iter().chain(flare_matches) {
            events_table.push(m);
        }
    }

    info!("stage E: resolving associations");
    {
        let cme_refs: Vec<&store::Cme> = eligible_cmes.iter().collect();
        let spatial_table = ctx.tables.spatial_consistency.lock().unwrap();
        let events_table = ctx.tables.region_events.lock().unwrap();
        let associations = assoc_resolver::resolve_associations(&cme_refs, &spatial_table, &events_table);
        summary.n_associations = associations.len();
        drop(spatial_table);
        drop(events_table);

        let mut table = ctx.tables.associations.lock().unwrap();
        table.truncate();
        for assoc in associations {
            table.insert(assoc);
        }
    }

    info!("stage F: slicing windows");
    let image_policy: Arc<dyn window_slicer::ImageCountPolicy> = match args.image_policy {
        ImagePolicyArg::Unrestricted => Arc::new(window_slicer::Unrestricted),
        ImagePolicyArg::Sdoml => Arc::new(window_slicer::SdomlImageCount),
    };
    window_slicer::slice_all_regions(&ctx, image_policy).await?;
    {
        let slices = ctx.tables.slices.lock().unwrap();
        summary.n_slices_accepted = slices.accepted().len();
        summary.n_slices_rejected = slices.rejected().len();
    }

    info!("stage G: partitioning splits");
    let folds = split_partitioner::partition_regions(&ctx)?;
    summary.n_folds = folds.len();

    let (accepted, rejected) = {
        let slices = ctx.tables.slices.lock().unwrap();
        (slices.accepted().to_vec(), slices.rejected().to_vec())
    };
    output::write_slices(&args.output_dir, &accepted, &rejected)?;
    output::write_folds(&args.output_dir, &folds)?;

    info!("{}", summary);
    if summary.outcome() == summary::RunOutcome::Fail {
        anyhow::bail!("pipeline run failed");
    }
    Ok(())
}
