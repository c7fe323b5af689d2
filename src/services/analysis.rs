// ABOUTME: Analysis orchestration running every analytics component over one subject's records
// ABOUTME: Each component reports Computed or Unavailable so partial results still return
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::input::AnalysisHistory;
use chrono::{DateTime, Utc};
use plateau_core::errors::AnalysisError;
use plateau_core::models::{
    CorrelationResult, DailyRecord, GeneratedInsight, LifestyleVariable, StreakMetrics,
    TrackedVariable,
};
use plateau_intelligence::{
    AnalysisConfig, ComplianceReport, CorrelationEngine, DailySeries, DetectionReport,
    ForensicDifferentialAnalyzer, ForensicReport, InsightGenerator, PlateauBreakthroughDetector,
    RecordQualityScreener, StreakComplianceEngine, WeightAnomaly,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Result of one component: computed, or the reason it could not be
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "result", rename_all = "snake_case")]
pub enum Outcome<T> {
    /// The component produced a result
    Computed(T),
    /// The component could not run on this data
    Unavailable {
        /// Human-readable reason, e.g. which minimum was not met
        reason: String,
    },
}

impl<T> Outcome<T> {
    /// Wrap a component result
    #[must_use]
    pub fn from_result(result: Result<T, AnalysisError>) -> Self {
        match result {
            Ok(value) => Self::Computed(value),
            Err(error) => Self::unavailable(error.to_string()),
        }
    }

    /// Unavailable with the given reason
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// The computed value, if any
    #[must_use]
    pub const fn computed(&self) -> Option<&T> {
        match self {
            Self::Computed(value) => Some(value),
            Self::Unavailable { .. } => None,
        }
    }

    /// Whether the component produced a result
    #[must_use]
    pub const fn is_computed(&self) -> bool {
        matches!(self, Self::Computed(_))
    }
}

/// One subject's data and context for a run
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// Subject identifier; namespaces plateau and breakthrough ids
    pub subject: String,
    /// Raw records in any order
    pub records: Vec<DailyRecord>,
    /// Output of earlier runs
    pub history: AnalysisHistory,
    /// Reference instant for streaks and insight timestamps
    pub now: DateTime<Utc>,
}

impl AnalysisRequest {
    /// Request with empty history, evaluated at the current time
    #[must_use]
    pub fn new(subject: impl Into<String>, records: Vec<DailyRecord>) -> Self {
        Self {
            subject: subject.into(),
            records,
            history: AnalysisHistory::default(),
            now: Utc::now(),
        }
    }

    /// Attach history from earlier runs
    #[must_use]
    pub fn with_history(mut self, history: AnalysisHistory) -> Self {
        self.history = history;
        self
    }

    /// Evaluate as of a fixed instant
    #[must_use]
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }
}

/// Everything one run produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Subject the report belongs to
    pub subject: String,
    /// Reference instant of the run
    pub generated_at: DateTime<Utc>,
    /// Days in the lookback window
    pub days_analyzed: usize,
    /// Implausible weights in the window
    pub anomalies: Vec<WeightAnomaly>,
    /// Plateaus, breakthroughs and spikes
    pub detection: Outcome<DetectionReport>,
    /// One report per breakthrough that closed a plateau
    pub forensics: Outcome<Vec<ForensicReport>>,
    /// Every variable and lag with enough aligned days
    pub correlations: Outcome<Vec<CorrelationResult>>,
    /// New insights, best first
    pub insights: Vec<GeneratedInsight>,
    /// Weight logging streak
    pub weight_streak: StreakMetrics,
    /// Logging compliance of the critical variables
    pub compliance: ComplianceReport,
}

impl AnalysisReport {
    /// History for the next run: earlier history plus this run's breakthroughs and insights
    #[must_use]
    pub fn next_history(&self, previous: &AnalysisHistory) -> AnalysisHistory {
        let mut history = previous.clone();
        if let Some(detection) = self.detection.computed() {
            for context in detection.breakthrough_contexts() {
                if !history.breakthrough_contexts.contains(&context) {
                    history.breakthrough_contexts.push(context);
                }
            }
        }
        history
            .existing_insights
            .extend(self.insights.iter().map(GeneratedInsight::to_existing));
        history
    }
}

/// Runs the full analytics flow for one subject at a time
#[derive(Debug, Clone, Default)]
pub struct AnalysisService {
    config: AnalysisConfig,
}

impl AnalysisService {
    /// Service using the given configuration
    #[must_use]
    pub const fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze one subject
    ///
    /// Components that cannot run on the data are reported as
    /// [`Outcome::Unavailable`]; the rest still compute.
    #[must_use]
    pub fn analyze(&self, request: &AnalysisRequest) -> AnalysisReport {
        let series = DailySeries::from_records(
            &request.records,
            self.config.detection.duplicate_day_policy,
        );
        let window = series.lookback(self.config.detection.lookback_days);
        debug!(
            subject = %request.subject,
            records = request.records.len(),
            days = window.len(),
            "Starting analysis"
        );

        let anomalies = RecordQualityScreener::new(self.config.quality.clone()).screen(&window);

        let detection = Outcome::from_result(
            PlateauBreakthroughDetector::new(self.config.detection.clone()).detect(
                &request.subject,
                &series,
                &request.history.breakthrough_contexts,
            ),
        );

        let forensics = match detection.computed() {
            Some(report) => self.forensics(&window, report),
            None => Outcome::unavailable("plateau detection did not run"),
        };

        let correlations = self.correlations(&window);

        let insights = InsightGenerator::with_config(self.config.insights.clone())
            .with_significance_level(self.config.correlation.significance_level)
            .generate(
                correlations.computed().map_or(&[][..], Vec::as_slice),
                &window,
                &request.history.existing_insights,
                request.now,
            );

        let today = request.now.date_naive();
        let streaks = StreakComplianceEngine::new(self.config.streaks.clone());
        let weight_streak =
            streaks.variable_streak(&request.records, TrackedVariable::Weight, today);
        let compliance = streaks.compliance(&request.records, today);

        info!(
            subject = %request.subject,
            days = window.len(),
            anomalies = anomalies.len(),
            detection = detection.is_computed(),
            forensics = forensics.is_computed(),
            correlations = correlations.is_computed(),
            insights = insights.len(),
            current_streak = weight_streak.current_streak,
            "Analysis complete"
        );

        AnalysisReport {
            subject: request.subject.clone(),
            generated_at: request.now,
            days_analyzed: window.len(),
            anomalies,
            detection,
            forensics,
            correlations,
            insights,
            weight_streak,
            compliance,
        }
    }

    fn forensics(
        &self,
        window: &DailySeries,
        detection: &DetectionReport,
    ) -> Outcome<Vec<ForensicReport>> {
        let analyzer = ForensicDifferentialAnalyzer::new(self.config.forensics.clone());
        let mut last_error = None;
        let mut reports = Vec::new();

        for breakthrough in &detection.breakthroughs {
            let Some(plateau) = detection.plateau_for(breakthrough) else {
                debug!(date = %breakthrough.date, "Breakthrough did not close a plateau");
                continue;
            };
            match analyzer.analyze(window, plateau, breakthrough) {
                Ok(report) => reports.push(report),
                Err(error) => {
                    debug!(date = %breakthrough.date, %error, "Skipping forensic comparison");
                    last_error = Some(error);
                }
            }
        }

        match (reports.is_empty(), last_error) {
            (false, _) => Outcome::Computed(reports),
            (true, Some(error)) => Outcome::unavailable(error.to_string()),
            (true, None) => Outcome::unavailable("no breakthrough closed a plateau"),
        }
    }

    fn correlations(&self, window: &DailySeries) -> Outcome<Vec<CorrelationResult>> {
        let engine = CorrelationEngine::new(self.config.correlation.clone());
        let results = engine.sweep(window, &LifestyleVariable::ALL);
        if results.is_empty() {
            Outcome::from_result(Err(AnalysisError::insufficient(
                "correlation",
                self.config.correlation.min_samples,
                0,
            )))
        } else {
            Outcome::Computed(results)
        }
    }
}
