use log::info;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// Valeur de métrique typée
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Usize(usize),
    F32(f32),
    Duration(Duration),
}

impl MetricValue {
    fn as_f64(&self) -> f64 {
        match self {
            MetricValue::Usize(u) => *u as f64,
            MetricValue::F32(v) => *v as f64,
            MetricValue::Duration(d) => d.as_secs_f64(),
        }
    }

    fn same_kind(&self, v: f64) -> MetricValue {
        match self {
            MetricValue::Usize(_) => MetricValue::Usize(v.round() as usize),
            MetricValue::F32(_) => MetricValue::F32(v as f32),
            MetricValue::Duration(_) => MetricValue::Duration(Duration::from_secs_f64(v.max(0.0))),
        }
    }
}

impl From<usize> for MetricValue {
    fn from(v: usize) -> Self {
        MetricValue::Usize(v)
    }
}
impl From<f32> for MetricValue {
    fn from(v: f32) -> Self {
        MetricValue::F32(v)
    }
}
impl From<Duration> for MetricValue {
    fn from(v: Duration) -> Self {
        MetricValue::Duration(v)
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Usize(u) => write!(f, "{}", u),
            MetricValue::F32(v) => write!(f, "{:.4}", v),
            MetricValue::Duration(d) => write!(f, "{:.2?}", d),
        }
    }
}

/// (avg, min, max)
pub type Summary<T> = (T, T, T);

struct ProfilerInner {
    samples: HashMap<String, Vec<f32>>, // durées en ms
    metrics: HashMap<String, Vec<MetricValue>>,
    max_samples: usize,
}

fn push_bounded<T>(buffer: &mut Vec<T>, value: T, max_samples: usize) {
    if buffer.len() >= max_samples {
        buffer.remove(0);
    }
    buffer.push(value);
}

/// Shared timing / metrics collector for the host side.
///
/// Never used inside the block computation itself: it locks.
#[derive(Clone)]
pub struct Profiler {
    inner: Arc<RwLock<ProfilerInner>>,
}

impl Profiler {
    pub fn new(max_samples: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ProfilerInner {
                samples: HashMap::new(),
                metrics: HashMap::new(),
                max_samples: max_samples.max(1),
            })),
        }
    }

    /// Mesure d'un bloc labelisé (RAII)
    pub fn measure(&self, label: impl Into<String>) -> MeasureGuard<'_> {
        MeasureGuard {
            profiler: self,
            label: label.into(),
            start: Instant::now(),
        }
    }

    fn record_duration(&self, label: String, elapsed: Duration) {
        let dt = elapsed.as_secs_f32() * 1000.0;
        // Un verrou empoisonné ne doit pas faire tomber le rendu
        let Ok(mut inner) = self.inner.write() else {
            return;
        };
        let max_samples = inner.max_samples;
        push_bounded(inner.samples.entry(label).or_default(), dt, max_samples);
    }

    /// Enregistre une métrique scalaire typée
    pub fn record_metric<T: Into<MetricValue>>(&self, label: impl Into<String>, value: T) {
        let Ok(mut inner) = self.inner.write() else {
            return;
        };
        let max_samples = inner.max_samples;
        push_bounded(
            inner.metrics.entry(label.into()).or_default(),
            value.into(),
            max_samples,
        );
    }

    /// Résumé des temps mesurés en ms
    pub fn summary(&self) -> HashMap<String, Summary<f32>> {
        let Ok(inner) = self.inner.read() else {
            return HashMap::new();
        };
        inner
            .samples
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.clone(), summarize_series(v)))
            .collect()
    }

    pub fn metric_summary(&self, label: &str) -> Option<Summary<MetricValue>> {
        let inner = self.inner.read().ok()?;
        inner.metrics.get(label).and_then(|v| summarize_metric(v))
    }

    pub fn metrics_summary(&self) -> HashMap<String, Summary<MetricValue>> {
        let Ok(inner) = self.inner.read() else {
            return HashMap::new();
        };
        inner
            .metrics
            .iter()
            .filter_map(|(k, v)| summarize_metric(v).map(|s| (k.clone(), s)))
            .collect()
    }

    /// Log toutes les métriques vers l'info log avec un target spécifique
    pub fn log_metrics_for_target(&self, target: &str) {
        for (label, (avg, min, max)) in self.summary() {
            info!(
                target: target,
                "{}: avg = {:.3} ms | min = {:.3} ms | max = {:.3} ms",
                label, avg, min, max
            );
        }
        for (label, (avg, min, max)) in self.metrics_summary() {
            info!(target: target, "{label}: avg={avg}, min={min}, max={max}");
        }
    }
}

fn summarize_series(series: &[f32]) -> Summary<f32> {
    let avg = series.iter().sum::<f32>() / series.len() as f32;
    let min = series.iter().cloned().fold(f32::MAX, f32::min);
    let max = series.iter().cloned().fold(f32::MIN, f32::max);
    (avg, min, max)
}

/// Résumé d'une série homogène de MetricValue (le type du premier élément fait foi)
pub fn summarize_metric(series: &[MetricValue]) -> Option<Summary<MetricValue>> {
    let first = series.first()?;
    let values: Vec<f64> = series.iter().map(MetricValue::as_f64).collect();
    let avg = values.iter().sum::<f64>() / values.len() as f64;
    let min = values.iter().cloned().fold(f64::MAX, f64::min);
    let max = values.iter().cloned().fold(f64::MIN, f64::max);
    Some((first.same_kind(avg), first.same_kind(min), first.same_kind(max)))
}

/// Mesure d'un bloc labelisé (RAII)
pub struct MeasureGuard<'a> {
    profiler: &'a Profiler,
    label: String,
    start: Instant,
}

impl Drop for MeasureGuard<'_> {
    fn drop(&mut self) {
        self.profiler
            .record_duration(std::mem::take(&mut self.label), self.start.elapsed());
    }
}

/// Macro helper : déduit automatiquement le target via le module appelant
#[macro_export]
macro_rules! log_metrics {
    ($profiler:expr) => {
        $profiler.log_metrics_for_target(module_path!());
    };
}
