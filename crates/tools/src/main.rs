use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::PathBuf;

use foundation::geo::LatLng;
use overlay::filter::TagFilter;
use overlay::plan::{OverlayPlan, ViewportAction};
use overlay::projector::{ProjectorConfig, project};
use serde::Serialize;

fn main() {
    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    let mut args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(usage());
    }

    let cmd = args[1].clone();
    args.drain(0..2);

    match cmd.as_str() {
        "plan" => cmd_plan(args),
        "tags" => cmd_tags(args),
        _ => Err(usage()),
    }
}

fn usage() -> String {
    [
        "usage:",
        "  aroundme plan <snapshot.json> [--tags A,B,...] [--viewer LAT,LNG]",
        "  aroundme tags <snapshot.json>",
    ]
    .join("\n")
}

fn cmd_plan(args: Vec<String>) -> Result<(), String> {
    if args.is_empty() {
        return Err(usage());
    }

    let path = PathBuf::from(&args[0]);
    let mut tags: Option<Vec<String>> = None;
    let mut viewer: Option<LatLng> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--tags" => {
                i += 1;
                if i >= args.len() {
                    return Err("--tags requires a value".to_string());
                }
                tags = Some(
                    args[i]
                        .split(',')
                        .map(str::trim)
                        .filter(|t| !t.is_empty())
                        .map(str::to_string)
                        .collect(),
                );
            }
            "--viewer" => {
                i += 1;
                if i >= args.len() {
                    return Err("--viewer requires a value".to_string());
                }
                viewer = Some(parse_latlng(&args[i])?);
            }
            s => {
                return Err(format!("unknown arg: {s}\n\n{}", usage()));
            }
        }
        i += 1;
    }

    let store = load_snapshot(&path)?;
    let filter = match tags {
        Some(tags) => TagFilter::with_active(tags),
        None => TagFilter::default(),
    };

    let plan = project(
        store.entities(),
        &filter,
        viewer,
        &ProjectorConfig::default(),
    )
    .map_err(|e| format!("project: {e}"))?;

    let out = PlanOut::from_plan(&plan);
    println!(
        "{}",
        serde_json::to_string_pretty(&out).map_err(|e| format!("encode plan: {e}"))?
    );
    Ok(())
}

fn cmd_tags(args: Vec<String>) -> Result<(), String> {
    if args.len() != 1 {
        return Err(usage());
    }

    let store = load_snapshot(&PathBuf::from(&args[0]))?;
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for entity in store.iter() {
        for tag in &entity.tags {
            *counts.entry(tag.clone()).or_default() += 1;
        }
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&counts).map_err(|e| format!("encode tags: {e}"))?
    );
    Ok(())
}

fn load_snapshot(path: &PathBuf) -> Result<overlay::store::EntityStore, String> {
    let json = fs::read_to_string(path).map_err(|e| format!("read {path:?}: {e}"))?;
    feed::decode_snapshot(&json).map_err(|e| format!("decode {path:?}: {e}"))
}

fn parse_latlng(s: &str) -> Result<LatLng, String> {
    let Some((lat, lng)) = s.split_once(',') else {
        return Err(format!("expected LAT,LNG, got {s:?}"));
    };
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|e| format!("bad latitude {lat:?}: {e}"))?;
    let lng: f64 = lng
        .trim()
        .parse()
        .map_err(|e| format!("bad longitude {lng:?}: {e}"))?;
    let position = LatLng::new(lat, lng);
    position.validate().map_err(|e| e.to_string())?;
    Ok(position)
}

#[derive(Serialize)]
struct PlanOut {
    markers: Vec<MarkerOut>,
    connectors: Vec<ConnectorOut>,
    #[serde(skip_serializing_if = "Option::is_none")]
    viewer: Option<ViewerOut>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ring: Option<RingOut>,
    viewport: ViewportOut,
}

#[derive(Serialize)]
struct MarkerOut {
    id: u64,
    lat: f64,
    lng: f64,
    label: String,
    avatar: String,
    tags: Vec<String>,
}

#[derive(Serialize)]
struct ConnectorOut {
    from: [f64; 2],
    to: [f64; 2],
    to_id: u64,
}

#[derive(Serialize)]
struct ViewerOut {
    lat: f64,
    lng: f64,
    label: String,
}

#[derive(Serialize)]
struct RingOut {
    lat: f64,
    lng: f64,
    radius_m: f64,
}

#[derive(Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum ViewportOut {
    Fit {
        min_lat: f64,
        min_lon: f64,
        max_lat: f64,
        max_lon: f64,
    },
    Keep,
}

impl PlanOut {
    fn from_plan(plan: &OverlayPlan) -> Self {
        Self {
            markers: plan
                .markers
                .iter()
                .map(|m| MarkerOut {
                    id: m.id.0,
                    lat: m.position.lat_deg,
                    lng: m.position.lon_deg,
                    label: m.label.clone(),
                    avatar: m.avatar.0.clone(),
                    tags: m.tags.clone(),
                })
                .collect(),
            connectors: plan
                .connectors
                .iter()
                .map(|c| ConnectorOut {
                    from: [c.from.lat_deg, c.from.lon_deg],
                    to: [c.to.lat_deg, c.to.lon_deg],
                    to_id: c.to_id.0,
                })
                .collect(),
            viewer: plan.viewer.as_ref().map(|v| ViewerOut {
                lat: v.position.lat_deg,
                lng: v.position.lon_deg,
                label: v.label.clone(),
            }),
            ring: plan.ring.map(|r| RingOut {
                lat: r.center.lat_deg,
                lng: r.center.lon_deg,
                radius_m: r.radius_m,
            }),
            viewport: match plan.viewport {
                ViewportAction::Fit(b) => ViewportOut::Fit {
                    min_lat: b.min_lat,
                    min_lon: b.min_lon,
                    max_lat: b.max_lat,
                    max_lon: b.max_lon,
                },
                ViewportAction::Keep => ViewportOut::Keep,
            },
        }
    }
}
