//! Search space of parameterized operators drawn from a fixed catalog.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::schema::{CanonicalKey, CatalogConfig, ConfigError, ExportedStage, OperatorSpec};

use super::rng::PipelineRng;
use super::step::{DelegateError, SearchSpace, Step};

/// Operator catalog acting as a step search space.
#[derive(Debug)]
pub struct OperatorCatalog {
    operators: Vec<Arc<OperatorSpec>>,
    mutation_strength: f64,
}

impl OperatorCatalog {
    /// Build a catalog from validated configuration.
    pub fn new(config: CatalogConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            operators: config.operators.into_iter().map(Arc::new).collect(),
            mutation_strength: config.mutation_strength,
        })
    }

    /// Operators available to new steps.
    pub fn operators(&self) -> impl Iterator<Item = &OperatorSpec> {
        self.operators.iter().map(|op| op.as_ref())
    }
}

impl SearchSpace for OperatorCatalog {
    type Step = OperatorStep;

    fn generate(&self, rng: &mut PipelineRng) -> Result<OperatorStep, DelegateError> {
        let spec = Arc::clone(&self.operators[rng.index(self.operators.len())]);
        let values = spec.params.iter().map(|p| rng.uniform(p.bounds)).collect();
        Ok(OperatorStep {
            spec,
            values,
            mutation_strength: self.mutation_strength,
        })
    }
}

/// One configured operator in a pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorStep {
    spec: Arc<OperatorSpec>,
    /// Parameter values, parallel to `spec.params`.
    values: Vec<f64>,
    mutation_strength: f64,
}

impl OperatorStep {
    pub fn name(&self) -> &str {
        &self.spec.name
    }

    /// Current value of a named parameter.
    pub fn param(&self, name: &str) -> Option<f64> {
        self.spec
            .params
            .iter()
            .position(|p| p.name == name)
            .map(|i| self.values[i])
    }

    fn params(&self) -> BTreeMap<String, f64> {
        self.spec
            .params
            .iter()
            .zip(&self.values)
            .map(|(p, &v)| (p.name.clone(), v))
            .collect()
    }
}

impl Step for OperatorStep {
    /// Gaussian perturbation of one parameter.
    fn mutate(&mut self, rng: &mut PipelineRng) -> Result<Option<bool>, DelegateError> {
        if self.values.is_empty() {
            return Ok(Some(false));
        }
        let idx = rng.index(self.values.len());
        let bounds = self.spec.params[idx].bounds;
        self.values[idx] = rng.gaussian_mutate(self.values[idx], self.mutation_strength, bounds);
        Ok(Some(true))
    }

    /// Blend parameters of two instances of the same operator.
    fn crossover(
        &mut self,
        other: &mut Self,
        rng: &mut PipelineRng,
    ) -> Result<bool, DelegateError> {
        if self.spec.name != other.spec.name || self.values.is_empty() {
            return Ok(false);
        }

        let t = rng.uniform((0.0, 1.0));
        for (a, b) in self.values.iter_mut().zip(other.values.iter_mut()) {
            let (mine, theirs) = (blend(*a, *b, t), blend(*b, *a, t));
            *a = mine;
            *b = theirs;
        }
        Ok(true)
    }

    fn export(&self) -> ExportedStage {
        ExportedStage::Operator {
            name: self.spec.name.clone(),
            params: self.params(),
        }
    }

    /// Name followed by `param=value` components in parameter-name order.
    fn unique_id(&self) -> CanonicalKey {
        let mut parts = vec![CanonicalKey::from(self.spec.name.as_str())];
        parts.extend(
            self.params()
                .into_iter()
                .map(|(name, value)| CanonicalKey::Text(format!("{name}={value}"))),
        );
        CanonicalKey::Tuple(parts)
    }
}

/// Linear blend between two values.
fn blend(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ParamSpec;

    fn catalog() -> OperatorCatalog {
        OperatorCatalog::new(CatalogConfig::default()).unwrap()
    }

    fn single(spec: OperatorSpec) -> OperatorCatalog {
        OperatorCatalog::new(CatalogConfig {
            operators: vec![spec],
            mutation_strength: 0.5,
        })
        .unwrap()
    }

    #[test]
    fn test_generated_params_within_bounds() {
        let catalog = catalog();
        let mut rng = PipelineRng::new(42);
        for _ in 0..100 {
            let step = catalog.generate(&mut rng).unwrap();
            let spec = catalog.operators().find(|op| op.name == step.name()).unwrap();
            for param in &spec.params {
                let v = step.param(&param.name).unwrap();
                assert!(v >= param.bounds.0 && v <= param.bounds.1);
            }
        }
    }

    #[test]
    fn test_mutation_stays_in_bounds() {
        let catalog = single(OperatorSpec::new("PCA", vec![ParamSpec::new("variance", 0.5, 1.0)]));
        let mut rng = PipelineRng::new(1);
        let mut step = catalog.generate(&mut rng).unwrap();
        for _ in 0..100 {
            assert_eq!(step.mutate(&mut rng).unwrap(), Some(true));
            let v = step.param("variance").unwrap();
            assert!((0.5..=1.0).contains(&v));
        }
    }

    #[test]
    fn test_parameterless_mutation_is_noop() {
        let catalog = single(OperatorSpec::new("StandardScaler", Vec::new()));
        let mut rng = PipelineRng::new(1);
        let mut step = catalog.generate(&mut rng).unwrap();
        let before = step.clone();
        assert_eq!(step.mutate(&mut rng).unwrap(), Some(false));
        assert_eq!(step, before);
    }

    #[test]
    fn test_crossover_requires_same_operator() {
        let mut rng = PipelineRng::new(5);
        let catalog = catalog();
        let mut pca = None;
        let mut other = None;
        while pca.is_none() || other.is_none() {
            let step = catalog.generate(&mut rng).unwrap();
            if step.name() == "PCA" {
                pca.get_or_insert(step);
            } else {
                other.get_or_insert(step);
            }
        }
        let (mut pca, mut other) = (pca.unwrap(), other.unwrap());
        assert!(!pca.crossover(&mut other, &mut rng).unwrap());
    }

    #[test]
    fn test_crossover_blends_within_range() {
        let catalog = single(OperatorSpec::new("PCA", vec![ParamSpec::new("variance", 0.0, 1.0)]));
        let mut rng = PipelineRng::new(5);
        let mut a = catalog.generate(&mut rng).unwrap();
        let mut b = catalog.generate(&mut rng).unwrap();
        let (va, vb) = (a.param("variance").unwrap(), b.param("variance").unwrap());
        let (lo, hi) = (va.min(vb), va.max(vb));

        assert!(a.crossover(&mut b, &mut rng).unwrap());
        for v in [a.param("variance").unwrap(), b.param("variance").unwrap()] {
            assert!(v >= lo - 1e-12 && v <= hi + 1e-12);
        }
    }

    #[test]
    fn test_unique_id_reflects_params() {
        let catalog = single(OperatorSpec::new(
            "Nystroem",
            vec![ParamSpec::new("gamma", 0.0, 1.0), ParamSpec::new("components", 1.0, 11.0)],
        ));
        let mut rng = PipelineRng::new(2);
        let mut step = catalog.generate(&mut rng).unwrap();
        let key = step.unique_id();
        assert_eq!(key, step.clone().unique_id());

        let parts = key.parts().unwrap();
        assert_eq!(parts[0], CanonicalKey::from("Nystroem"));
        assert!(matches!(&parts[1], CanonicalKey::Text(s) if s.starts_with("components=")));
        assert!(matches!(&parts[2], CanonicalKey::Text(s) if s.starts_with("gamma=")));

        step.mutate(&mut rng).unwrap();
        assert_ne!(step.unique_id(), key);
    }

    #[test]
    fn test_export_carries_params() {
        let catalog = single(OperatorSpec::new("PCA", vec![ParamSpec::new("variance", 0.5, 1.0)]));
        let mut rng = PipelineRng::new(2);
        let step = catalog.generate(&mut rng).unwrap();
        match step.export() {
            ExportedStage::Operator { name, params } => {
                assert_eq!(name, "PCA");
                assert_eq!(params.get("variance").copied(), step.param("variance"));
            }
            ExportedStage::Pipeline(_) => panic!("expected operator stage"),
        }
    }
}
