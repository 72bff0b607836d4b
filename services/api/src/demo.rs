use crate::infra::{build_orchestrator, deterministic_orchestrator};
use citizen_aid::config::AppConfig;
use citizen_aid::error::AppError;
use citizen_aid::workflows::assistance::{
    AssistanceOrchestrator, PipelineResponse, UserAttributes, Verdict,
};
use clap::Args;

#[derive(Args, Debug)]
pub(crate) struct SolveArgs {
    /// Free-text description of the citizen's problem
    #[arg(long, value_parser = crate::infra::parse_issue)]
    pub(crate) issue: String,
    /// Monthly household income in PKR
    #[arg(long)]
    pub(crate) income: Option<u32>,
    /// Number of people in the household
    #[arg(long)]
    pub(crate) family_size: Option<u32>,
    /// Number of dependent children
    #[arg(long)]
    pub(crate) children: Option<u32>,
    /// Applicant age in years
    #[arg(long)]
    pub(crate) age: Option<u32>,
    /// City or district
    #[arg(long)]
    pub(crate) location: Option<String>,
    /// Print the full response as JSON instead of the narrative
    #[arg(long)]
    pub(crate) json: bool,
}

impl SolveArgs {
    fn attributes(&self) -> UserAttributes {
        let mut attributes = UserAttributes::default();
        if let Some(income) = self.income {
            attributes = attributes.with_monthly_income(income);
        }
        if let Some(size) = self.family_size {
            attributes = attributes.with_family_size(size);
        }
        if let Some(children) = self.children {
            attributes = attributes.with_children(children);
        }
        if let Some(age) = self.age {
            attributes = attributes.with_age(age);
        }
        if let Some(location) = &self.location {
            attributes = attributes.with_location(location.as_str());
        }
        attributes
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print each pipeline response as JSON as well
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) async fn run_solve(args: SolveArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let orchestrator = build_orchestrator(&config.assistant)?;
    let response = orchestrator
        .solve(&args.issue, &args.attributes())
        .await;

    if args.json {
        match serde_json::to_string_pretty(&response) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Response payload unavailable: {err}"),
        }
    } else {
        render_response(&response);
    }
    Ok(())
}

struct Scenario {
    title: &'static str,
    issue: &'static str,
    attributes: UserAttributes,
}

fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            title: "School fees for three children",
            issue: "I need help paying school fees for my children",
            attributes: UserAttributes::default()
                .with_monthly_income(25_000)
                .with_children(3)
                .with_family_size(5)
                .with_location("Lahore"),
        },
        Scenario {
            title: "Job loss with no details",
            issue: "I lost my job and need financial help",
            attributes: UserAttributes::default(),
        },
        Scenario {
            title: "Hospital bills above the income limit",
            issue: "My mother needs surgery at the hospital urgently",
            attributes: UserAttributes::default()
                .with_monthly_income(120_000)
                .with_family_size(4),
        },
        Scenario {
            title: "Young entrepreneur",
            issue: "I want a loan to start a small business",
            attributes: UserAttributes::default()
                .with_monthly_income(40_000)
                .with_age(26)
                .with_location("Karachi"),
        },
    ]
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let orchestrator = deterministic_orchestrator();

    println!("Citizen assistance demo (rule-based strategies)");
    for scenario in scenarios() {
        println!("\n== {} ==", scenario.title);
        println!("Request: {}", scenario.issue);
        let response = orchestrator
            .solve(scenario.issue, &scenario.attributes)
            .await;
        render_response(&response);

        if args.json {
            match serde_json::to_string_pretty(&response) {
                Ok(json) => println!("  Response payload:\n{json}"),
                Err(err) => println!("  Response payload unavailable: {err}"),
            }
        }
    }

    render_forwarding(&orchestrator);
    Ok(())
}

fn render_response(response: &PipelineResponse) {
    let analysis = &response.issue_analysis;
    println!(
        "- Issue type {} (confidence {:.2}, {} urgency)",
        analysis.issue_type.label(),
        analysis.confidence,
        analysis.urgency.label()
    );

    println!("- Eligibility:");
    for assessment in &response.eligibility_results {
        let tag = match assessment.eligibility.verdict {
            Verdict::Eligible => "eligible",
            Verdict::Ineligible => "not eligible",
            Verdict::Indeterminate => "more info needed",
        };
        println!(
            "    - {}: {} ({})",
            assessment.scheme,
            tag,
            assessment.eligibility.summary()
        );
    }

    if !response.document_requirements.is_empty() {
        println!("- Documents to prepare:");
        for requirement in &response.document_requirements {
            println!(
                "    - {}: {}",
                requirement.scheme,
                requirement.documents.join(", ")
            );
        }
    }

    println!("- Helplines:");
    for contact in &response.helpline_info.helplines {
        println!("    - {} {}", contact.name, contact.number);
    }

    if let Some(notice) = &response.notice {
        println!("- Notice: {notice}");
    }

    println!("\n{}", response.explanation);
}

fn render_forwarding(orchestrator: &AssistanceOrchestrator) {
    println!("\n== Forwarding an unmatched query ==");
    let forwarded = orchestrator.forward(
        "Our roof collapsed after the flood and we have nowhere to stay",
        &UserAttributes::default().with_family_size(6),
        None,
    );
    println!(
        "- Reference {} routed to {} (response within {})",
        forwarded.reference_id, forwarded.department_name, forwarded.estimated_response_time
    );
    for step in &forwarded.next_steps {
        println!("    - {step}");
    }
}
