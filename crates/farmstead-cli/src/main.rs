//! farmstead CLI - build a farmhouse compound from a parameter file
//!
//! Reads a TOML parameter set (or uses the built-in sample), builds every
//! drawing and solid, and writes them as JSON or STL.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use farmstead::massing::TriangleMesh;
use farmstead::math::to_internal;
use farmstead::params::RoofHeights;
use farmstead::{build_compound, BuildOptions, ParameterSet};

#[derive(Parser)]
#[command(name = "farmstead")]
#[command(about = "Parametric farmhouse compound geometry", long_about = None)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the compound and write it as JSON
    Build {
        /// TOML parameter file (default: the sample farmhouse)
        #[arg(short, long)]
        params: Option<PathBuf>,
        /// Override the tree scatter seed
        #[arg(long)]
        seed: Option<u64>,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Indent the JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Export the massing of every building as binary STL
    Mesh {
        /// TOML parameter file (default: the sample farmhouse)
        #[arg(short, long)]
        params: Option<PathBuf>,
        /// Output .stl file
        output: PathBuf,
        /// Include the ground slab
        #[arg(long)]
        ground: bool,
    },
    /// Eave, rise and ridge of a symmetric gable, in feet
    Ridge {
        /// Eave height
        #[arg(long)]
        eave: f64,
        /// Span between the eave walls
        #[arg(long)]
        span: f64,
        /// Pitch as rise over run, e.g. 0.6667 for 8:12
        #[arg(long)]
        pitch: f64,
    },
    /// Validate a parameter file without building
    Check {
        /// TOML parameter file (default: the sample farmhouse)
        #[arg(short, long)]
        params: Option<PathBuf>,
    },
    /// Print the sample parameter set as TOML
    Defaults,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Build {
            params,
            seed,
            output,
            pretty,
        } => {
            build(params.as_deref(), seed, output.as_deref(), pretty)?;
        }
        Commands::Mesh {
            params,
            output,
            ground,
        } => {
            export_mesh(params.as_deref(), &output, ground)?;
        }
        Commands::Ridge { eave, span, pitch } => {
            let h = RoofHeights::derive(eave, span, pitch);
            println!("eave  {:.4}\nrise  {:.4}\nridge {:.4}", h.eave, h.rise, h.ridge);
        }
        Commands::Check { params } => {
            let set = load_params(params.as_deref())?;
            println!(
                "ok: {} buildings, {} features, {} sections",
                set.buildings.len(),
                set.features.len(),
                set.sections.len()
            );
        }
        Commands::Defaults => {
            print!("{}", ParameterSet::farmhouse().to_toml_string()?);
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn load_params(path: Option<&Path>) -> Result<ParameterSet> {
    let Some(path) = path else {
        debug!("using the sample farmhouse");
        return Ok(ParameterSet::farmhouse());
    };
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    ParameterSet::from_toml_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn build(params: Option<&Path>, seed: Option<u64>, output: Option<&Path>, pretty: bool) -> Result<()> {
    let set = load_params(params)?;
    let options = BuildOptions {
        seed,
        ..BuildOptions::default()
    };
    let compound = build_compound(&set, &options).context("building compound")?;

    let json = if pretty {
        serde_json::to_string_pretty(&compound)?
    } else {
        serde_json::to_string(&compound)?
    };
    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "wrote compound");
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn export_mesh(params: Option<&Path>, output: &Path, ground: bool) -> Result<()> {
    let set = load_params(params)?;
    let compound = build_compound(&set, &BuildOptions::default()).context("building compound")?;

    let mut mesh: TriangleMesh = compound.volumes.iter().map(|v| v.to_mesh()).collect();
    if ground {
        mesh.append(compound.ground.to_mesh());
    }

    fs::write(output, stl_bytes(&mesh)).with_context(|| format!("writing {}", output.display()))?;
    info!(
        path = %output.display(),
        triangles = mesh.len(),
        volume_cu_ft = mesh.volume() / to_internal(1.0).powi(3),
        "wrote STL"
    );
    Ok(())
}

/// Binary STL, millimetres, one facet normal per triangle.
fn stl_bytes(mesh: &TriangleMesh) -> Vec<u8> {
    let mut data = Vec::with_capacity(84 + mesh.len() * 50);

    let mut header = [b' '; 80];
    let title = b"farmstead STL export";
    header[..title.len()].copy_from_slice(title);
    data.extend_from_slice(&header);
    data.extend_from_slice(&(mesh.len() as u32).to_le_bytes());

    for facet in mesh.facets() {
        let n = facet.normal;
        let rows = std::iter::once([n.x, n.y, n.z])
            .chain(facet.corners.iter().map(|p| [p.x, p.y, p.z]));
        for row in rows {
            for c in row {
                data.extend_from_slice(&(c as f32).to_le_bytes());
            }
        }
        // Attribute byte count
        data.extend_from_slice(&0u16.to_le_bytes());
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stl_layout() {
        let compound = build_compound(&ParameterSet::farmhouse(), &BuildOptions::default()).unwrap();
        let mesh = compound.volumes[0].to_mesh();
        let bytes = stl_bytes(&mesh);
        assert_eq!(bytes.len(), 84 + mesh.len() * 50);
        let count = u32::from_le_bytes([bytes[80], bytes[81], bytes[82], bytes[83]]);
        assert_eq!(count as usize, mesh.len());

        // First facet: normal then three corners, little-endian f32.
        let first = &mesh.facets()[0];
        let read = |at: usize| f32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]]);
        assert_eq!(read(84 + 8), first.normal.z as f32);
        assert_eq!(read(84 + 12), first.corners[0].x as f32);
        assert!(bytes.starts_with(b"farmstead STL export"));
    }

    #[test]
    fn test_sample_loads_without_file() {
        let set = load_params(None).unwrap();
        assert_eq!(set, ParameterSet::farmhouse());
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = load_params(Some(Path::new("no/such/params.toml"))).unwrap_err();
        assert!(format!("{err:#}").contains("no/such/params.toml"));
    }

    #[test]
    fn test_cli_parses_build() {
        let cli = Cli::try_parse_from(["farmstead", "build", "--seed", "7", "--pretty"]).unwrap();
        match cli.command {
            Commands::Build { seed, pretty, .. } => {
                assert_eq!(seed, Some(7));
                assert!(pretty);
            }
            _ => panic!("expected build"),
        }
    }
}
