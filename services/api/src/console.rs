use clap::Args;
use consult_ai::error::AppError;
use consult_ai::workflows::consultation::{
    AdvisoryReporter, ConditionScorer, ConsultationRequest, ConsultationSubmission,
    DiagnosisResult, IntakeGuard, SymptomSet,
};

#[derive(Args, Debug)]
pub(crate) struct DiagnoseArgs {
    /// Reported symptom (repeat for each symptom)
    #[arg(long = "symptom", required = true)]
    pub(crate) symptoms: Vec<String>,
    /// How long the symptoms have lasted, e.g. "less than 3 days"
    #[arg(long)]
    pub(crate) duration: String,
    /// Reported severity: low, moderate or high
    #[arg(long)]
    pub(crate) severity: String,
    /// Free-text notes carried alongside the consultation
    #[arg(long, default_value = "")]
    pub(crate) notes: String,
    /// Patient age in years
    #[arg(long)]
    pub(crate) age: Option<i64>,
    /// Existing condition (repeat for each comorbidity)
    #[arg(long = "comorbidity")]
    pub(crate) comorbidities: Vec<String>,
    /// Also print the advisory report
    #[arg(long)]
    pub(crate) report: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Reported symptom (repeat for each symptom)
    #[arg(long = "symptom")]
    pub(crate) symptoms: Vec<String>,
    /// How long the symptoms have lasted, e.g. "more than 1 week"
    #[arg(long, default_value = "")]
    pub(crate) duration: String,
    /// Reported severity: low, moderate or high
    #[arg(long, default_value = "")]
    pub(crate) severity: String,
}

pub(crate) fn run_diagnose(args: DiagnoseArgs) -> Result<(), AppError> {
    let DiagnoseArgs {
        symptoms,
        duration,
        severity,
        notes,
        age,
        comorbidities,
        report,
    } = args;

    let request = IntakeGuard.request_from_submission(ConsultationSubmission {
        symptoms,
        duration,
        severity,
        notes,
        age,
        comorbidities,
        include_report: Some(report),
    })?;

    let diagnosis = ConditionScorer::standard().diagnose(&request);
    let advisory = report.then(|| {
        AdvisoryReporter::standard().generate_report(
            &request.symptoms,
            &request.duration,
            &request.severity,
        )
    });

    println!("{}", render_diagnosis(&request, &diagnosis, advisory.as_deref()));
    Ok(())
}

pub(crate) fn run_report(args: ReportArgs) {
    let symptoms = SymptomSet::new(args.symptoms);
    let report =
        AdvisoryReporter::standard().generate_report(&symptoms, &args.duration, &args.severity);
    println!("{report}");
}

pub(crate) fn render_diagnosis(
    request: &ConsultationRequest,
    diagnosis: &DiagnosisResult,
    advisory: Option<&str>,
) -> String {
    let mut lines = vec![
        "Consultation triage".to_string(),
        format!(
            "Symptoms: {} ({}, {})",
            request.symptoms.reported().join(", "),
            request.duration,
            request.severity
        ),
        String::new(),
    ];

    if diagnosis.is_match() {
        lines.push(format!("Primary diagnosis: {}", diagnosis.primary_diagnosis));
    } else {
        lines.push(format!("Primary diagnosis: none ({})", diagnosis.primary_diagnosis));
    }
    lines.push(format!("Treatment: {}", diagnosis.treatment));
    lines.push(format!("Lab exams: {}", diagnosis.lab_exams));
    lines.push(String::new());

    if diagnosis.differential_diagnoses.is_empty() {
        lines.push("Differential diagnoses: none".to_string());
    } else {
        lines.push("Differential diagnoses (relative to primary score)".to_string());
        lines.extend(
            diagnosis
                .differential_diagnoses
                .iter()
                .map(|entry| format!("- {}: {}", entry.condition, entry.confidence)),
        );
    }

    if let Some(advisory) = advisory {
        lines.push(String::new());
        lines.push(format!("Advisory: {advisory}"));
    }

    lines.join("\n")
}
