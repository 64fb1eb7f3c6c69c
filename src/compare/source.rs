//! The capability interface for comparable models and the named collection
//! that carries them into `compare`.

/// Anything from which a scalar AIC can be extracted.
///
/// Returning `None` means the model cannot report an AIC (for example, a fit
/// whose log-likelihood is not finite). `compare` treats non-finite values the
/// same way.
pub trait AicSource {
    fn aic(&self) -> Option<f64>;
}

/// A precomputed AIC value.
impl AicSource for f64 {
    fn aic(&self) -> Option<f64> {
        Some(*self)
    }
}

impl<T: AicSource + ?Sized> AicSource for &T {
    fn aic(&self) -> Option<f64> {
        (**self).aic()
    }
}

impl<T: AicSource + ?Sized> AicSource for Box<T> {
    fn aic(&self) -> Option<f64> {
        (**self).aic()
    }
}

impl<T: AicSource> AicSource for Option<T> {
    fn aic(&self) -> Option<f64> {
        self.as_ref().and_then(AicSource::aic)
    }
}

/// A fit summarized by its maximized log-likelihood and parameter count.
///
/// Useful for models fitted elsewhere (GLMs, mixed models) that report
/// `logLik` and degrees of freedom but not AIC directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InformationFit {
    pub log_likelihood: f64,
    /// Estimated parameters, including any variance/dispersion parameters.
    pub n_params: usize,
}

impl AicSource for InformationFit {
    fn aic(&self) -> Option<f64> {
        let aic = -2.0 * self.log_likelihood + 2.0 * self.n_params as f64;
        aic.is_finite().then_some(aic)
    }
}

/// Models keyed by name, in insertion order.
///
/// Duplicate names are accepted here and rejected by `compare`, so the error
/// surfaces at the comparison boundary.
#[derive(Debug, Clone)]
pub struct NamedModels<M> {
    entries: Vec<(String, M)>,
}

impl<M> NamedModels<M> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, name: impl Into<String>, model: M) {
        self.entries.push((name.into(), model));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&M> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, m)| m)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &M)> {
        self.entries.iter().map(|(n, m)| (n.as_str(), m))
    }
}

impl<M> Default for NamedModels<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M, S: Into<String>> FromIterator<(S, M)> for NamedModels<M> {
    fn from_iter<I: IntoIterator<Item = (S, M)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(n, m)| (n.into(), m)).collect(),
        }
    }
}

impl<M> IntoIterator for NamedModels<M> {
    type Item = (String, M);
    type IntoIter = std::vec::IntoIter<(String, M)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
