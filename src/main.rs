//! Linear pipeline CLI - Evolve random operator pipelines from JSON configuration.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use linear_pipeline_evo::{
    CanonicalKey, LinearPipelineGenerator, LinearPipelineIndividual, PipelineRng,
    compute::evolution::OperatorCatalog,
    schema::{CatalogConfig, LinearPipelineConfig},
};

fn default_population() -> usize {
    8
}

fn default_crossover_rate() -> f64 {
    0.8
}

/// Demo run configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DemoConfig {
    /// Structural limits for every pipeline.
    pipeline: LinearPipelineConfig,
    /// Operators steps are drawn from.
    #[serde(default)]
    catalog: CatalogConfig,
    /// Number of pipelines kept per generation.
    #[serde(default = "default_population")]
    population: usize,
    /// Probability of crossing a child with a random partner.
    #[serde(default = "default_crossover_rate")]
    crossover_rate: f64,
    /// Random seed for reproducibility.
    #[serde(default)]
    random_seed: Option<u64>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            pipeline: LinearPipelineConfig::default(),
            catalog: CatalogConfig::default(),
            population: default_population(),
            crossover_rate: default_crossover_rate(),
            random_seed: Some(42),
        }
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json> [generations]", args[0]);
        eprintln!();
        eprintln!("Evolve random linear pipelines from JSON configuration.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Path to run configuration file");
        eprintln!("  generations  Number of generations (default: 10)");
        eprintln!();
        eprintln!("Example configuration is printed with --example flag.");
        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_config();
        return;
    }

    let config_path = PathBuf::from(&args[1]);
    let generations: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(10);

    let config_str = fs::read_to_string(&config_path).unwrap_or_else(|e| {
        eprintln!("Error reading config file: {}", e);
        std::process::exit(1);
    });

    let config: DemoConfig = serde_json::from_str(&config_str).unwrap_or_else(|e| {
        eprintln!("Error parsing config: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = run(&config, generations) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(config: &DemoConfig, generations: usize) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Arc::new(OperatorCatalog::new(config.catalog.clone())?);
    let generator = LinearPipelineGenerator::new(catalog, config.pipeline.clone())?;

    let seed = config.random_seed.unwrap_or_else(rand::random);
    let mut rng = PipelineRng::new(seed);

    println!("Linear Pipeline Evolution");
    println!("=========================");
    println!("Seed: {}", seed);
    println!("Population: {}", config.population);
    println!("Max length: {}", config.pipeline.max_length);
    println!("Generations: {}", generations);
    println!();

    let mut population = (0..config.population.max(2))
        .map(|_| generator.generate(&mut rng))
        .collect::<Result<Vec<_>, _>>()?;

    let mut seen: HashSet<CanonicalKey> = population.iter().map(|p| p.unique_id()).collect();
    let start = Instant::now();

    for generation in 0..generations {
        let mut next = Vec::with_capacity(population.len());
        for i in 0..population.len() {
            next.push(offspring(&population, i, config.crossover_rate, &mut rng)?);
        }
        population = next;

        let before = seen.len();
        seen.extend(population.iter().map(|p| p.unique_id()));
        let mean_len =
            population.iter().map(|p| p.len()).sum::<usize>() as f32 / population.len() as f32;
        println!(
            "  Generation {}/{}: mean length={:.2}, new pipelines={}, distinct so far={}",
            generation + 1,
            generations,
            mean_len,
            seen.len() - before,
            seen.len()
        );
    }

    println!();
    println!("Final population:");
    for individual in &population {
        println!("  {}", individual.export());
    }
    println!();
    println!("Time: {:.3}s", start.elapsed().as_secs_f32());

    Ok(())
}

/// Clone a parent, optionally cross it with a random partner copy, then mutate it.
fn offspring(
    population: &[LinearPipelineIndividual<OperatorCatalog>],
    parent: usize,
    crossover_rate: f64,
    rng: &mut PipelineRng,
) -> Result<LinearPipelineIndividual<OperatorCatalog>, Box<dyn std::error::Error>> {
    let mut child = population[parent].clone();

    if rng.chance(crossover_rate) {
        let mut partner = population[rng.index(population.len())].clone();
        // Inner-step crossover rejects a shorter partner; keep the shorter one on the left.
        // Catalog steps are flat, so this ordering is enough.
        if partner.len() < child.len() {
            partner.crossover(&mut child, rng)?;
        } else {
            child.crossover(&mut partner, rng)?;
        }
    }

    child.mutate(rng)?;
    Ok(child)
}

fn print_example_config() {
    let config = DemoConfig::default();

    println!("Example configuration (config.json):");
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing example config: {}", e),
    }
}
