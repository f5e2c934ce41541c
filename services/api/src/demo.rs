use crate::infra::{parse_amount, InMemoryCreditRequestRepository, LoggingNotificationRelay};
use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use wallfin::config::AppConfig;
use wallfin::credit::feasibility::FeasibilityConfig;
use wallfin::credit::pricing::{
    EstimateSource, PaymentEstimator, MAX_PRINCIPAL, MIN_PRINCIPAL,
};
use wallfin::credit::requests::{
    AdditionalFundsRequest, ContactDetails, ContactRequest, CreditRequestError,
    CreditRequestService, CreditRequestSubmission, CreditType, Declarations,
    EarlyRepaymentRequest, EmploymentStatus, FamilyStatus, MonthlyCharges, RepaymentKind,
};
use wallfin::credit::{CreditQuote, CreditQuoter, QuoteRequest};
use wallfin::error::AppError;
use wallfin::format::{format_currency, format_percentage};

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// Requested amount in euros (accepts `12500`, `12 500,00`)
    #[arg(long, value_parser = parse_amount)]
    pub(crate) amount: Decimal,
    /// Repayment term in months
    #[arg(long)]
    pub(crate) duration: u16,
    /// Net monthly income of the household
    #[arg(long, value_parser = parse_amount)]
    pub(crate) income: Decimal,
    /// Existing monthly charges (rent, credits, other)
    #[arg(long, default_value = "0", value_parser = parse_amount)]
    pub(crate) charges: Decimal,
    /// Number of people in the household
    #[arg(long, default_value_t = 1)]
    pub(crate) household: u8,
    /// Print the quote as JSON instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DurationsArgs {
    /// Requested amount in euros
    #[arg(long, value_parser = parse_amount)]
    pub(crate) amount: Decimal,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Credit product for the sample request
    #[arg(long, default_value = "credit_auto", value_parser = parse_credit_type)]
    pub(crate) credit_type: CreditType,
    /// Requested amount for the sample request
    #[arg(long, default_value = "15001", value_parser = parse_amount)]
    pub(crate) amount: Decimal,
    /// Term for the sample request, in months
    #[arg(long, default_value_t = 60)]
    pub(crate) duration: u16,
    /// Monthly income for the sample request
    #[arg(long, default_value = "4200", value_parser = parse_amount)]
    pub(crate) income: Decimal,
    /// Skip the additional funds and early repayment portion of the demo.
    #[arg(long)]
    pub(crate) skip_follow_ups: bool,
}

fn parse_credit_type(raw: &str) -> Result<CreditType, String> {
    serde_json::from_value(serde_json::Value::String(raw.trim().to_string())).map_err(|_| {
        let known: Vec<String> = CreditType::ALL
            .iter()
            .filter_map(|kind| serde_json::to_value(kind).ok())
            .filter_map(|value| value.as_str().map(str::to_string))
            .collect();
        format!("unknown credit type '{raw}' (expected one of {})", known.join(", "))
    })
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let quoter = CreditQuoter::new(PaymentEstimator::default(), config.feasibility);
    let quote = quoter
        .quote(&QuoteRequest {
            amount: args.amount,
            duration_months: args.duration,
            monthly_income: args.income,
            existing_charges: args.charges,
            household_size: args.household,
        })
        .map_err(CreditRequestError::from)?;

    if args.json {
        match serde_json::to_string_pretty(&quote) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Quote payload unavailable: {err}"),
        }
        return Ok(());
    }

    render_quote(&quote);
    Ok(())
}

pub(crate) fn run_durations(args: DurationsArgs) -> Result<(), AppError> {
    let durations = PaymentEstimator::default().eligible_durations(args.amount);
    if durations.is_empty() {
        println!(
            "No credit product for {} (amounts from {} to {})",
            format_currency(args.amount),
            format_currency(MIN_PRINCIPAL),
            format_currency(MAX_PRINCIPAL)
        );
        return Ok(());
    }

    let terms: Vec<String> = durations.iter().map(|months| months.to_string()).collect();
    println!(
        "Terms offered for {}: {} months",
        format_currency(args.amount),
        terms.join(", ")
    );
    Ok(())
}

pub(crate) fn render_quote(quote: &CreditQuote) {
    let estimate = &quote.estimate;
    let assessment = &quote.assessment;

    println!(
        "Quote for {} over {} months",
        format_currency(quote.amount),
        quote.duration_months
    );
    println!(
        "- Monthly installment: {} (APR {})",
        format_currency(estimate.payment),
        format_percentage(estimate.apr)
    );
    match estimate.source {
        EstimateSource::Exact => println!("- Pricing: reference grid"),
        EstimateSource::Interpolated { lower, upper } => println!(
            "- Pricing: interpolated between {} and {}",
            format_currency(lower),
            format_currency(upper)
        ),
        EstimateSource::Scaled { anchor } => {
            println!("- Pricing: scaled from {}", format_currency(anchor))
        }
    }
    println!(
        "- Debt ratio: {}",
        format_percentage(assessment.debt_ratio_percent)
    );
    println!(
        "- Residual income: {} (minimum {})",
        format_currency(assessment.residual_income),
        format_currency(assessment.minimum_residual_income)
    );
    println!(
        "- Feasibility: {} ({})",
        assessment.status,
        assessment.status.label()
    );
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        credit_type,
        amount,
        duration,
        income,
        skip_follow_ups,
    } = args;

    let config = AppConfig::load()?;

    println!("Wallfin credit request demo");
    let (service, relay) = demo_service(config.feasibility);

    let durations = service.durations(amount);
    let terms: Vec<String> = durations.iter().map(|months| months.to_string()).collect();
    println!(
        "- Terms offered for {}: {}",
        format_currency(amount),
        if terms.is_empty() {
            "none".to_string()
        } else {
            terms.join(", ")
        }
    );

    let submission = demo_submission(credit_type, amount, duration, income);
    let record = match service.submit(submission) {
        Ok(record) => record,
        Err(err) => {
            println!("  Submission rejected: {err}");
            return Ok(());
        }
    };

    println!("\nRequest {} received", record.request_number);
    render_quote(&record.quote);

    match serde_json::to_string_pretty(&record.view()) {
        Ok(json) => println!("  Client status payload:\n{json}"),
        Err(err) => println!("  Client status payload unavailable: {err}"),
    }

    if !skip_follow_ups {
        println!("\nFollow-up requests on existing credits");
        let funds = AdditionalFundsRequest {
            credit_type: CreditType::PretTravaux,
            credit_reference: "WF-TRAV-2024-0007".to_string(),
            client_name: "Camille Dubois".to_string(),
            client_email: "camille.dubois@example.be".to_string(),
            amount: dec!(2500),
            comment: Some("Kitchen worktop".to_string()),
        };
        match service.request_additional_funds(&funds) {
            Ok(notification) => println!("- {}", notification.subject),
            Err(err) => println!("- Additional funds rejected: {err}"),
        }

        let repayment = EarlyRepaymentRequest {
            credit_type: CreditType::CreditAuto,
            credit_reference: "WF-AUTO-2023-0042".to_string(),
            client_name: "Camille Dubois".to_string(),
            client_email: "camille.dubois@example.be".to_string(),
            repayment_type: RepaymentKind::Total,
            amount: dec!(8420.50),
            remaining_balance: dec!(8420.50),
            comment: None,
        };
        match service.request_early_repayment(&repayment) {
            Ok(notification) => println!("- {}", notification.subject),
            Err(err) => println!("- Early repayment rejected: {err}"),
        }

        let contact = ContactRequest {
            client_name: "Camille Dubois".to_string(),
            client_email: "camille.dubois@example.be".to_string(),
            client_phone: Some("+32 470 12 34 56".to_string()),
            subject: "Payment date".to_string(),
            credit_reference: Some("WF-AUTO-2023-0042".to_string()),
            message: "Could the monthly debit move to the 5th?".to_string(),
        };
        match service.request_contact(&contact) {
            Ok(notification) => println!("- {}", notification.subject),
            Err(err) => println!("- Contact request rejected: {err}"),
        }
    }

    let outbox = relay.outbox();
    if outbox.is_empty() {
        println!("\nAdvisor notifications: none dispatched");
    } else {
        println!("\nAdvisor notifications:");
        for notification in outbox {
            println!(
                "  - {:?} -> {}",
                notification.template, notification.reference
            );
        }
    }

    Ok(())
}

type DemoService = CreditRequestService<InMemoryCreditRequestRepository, LoggingNotificationRelay>;

fn demo_service(feasibility: FeasibilityConfig) -> (DemoService, Arc<LoggingNotificationRelay>) {
    let repository = Arc::new(InMemoryCreditRequestRepository::default());
    let relay = Arc::new(LoggingNotificationRelay::default());
    let service = CreditRequestService::new(repository, relay.clone(), feasibility);
    (service, relay)
}

fn demo_submission(
    credit_type: CreditType,
    amount: Decimal,
    duration_months: u16,
    monthly_income: Decimal,
) -> CreditRequestSubmission {
    CreditRequestSubmission {
        credit_type,
        amount,
        duration_months,
        project_description: Some("Demo request from the command line".to_string()),
        employment_status: EmploymentStatus::Cdi,
        monthly_income,
        family_status: FamilyStatus::EnCouple,
        household_size: 2,
        charges: MonthlyCharges {
            rent_mortgage: dec!(650),
            current_credits: dec!(120),
            other_charges: dec!(80),
        },
        declarations: Declarations {
            is_belgian_resident: true,
            is_not_bnb_listed: true,
            accepts_data_processing: true,
        },
        contact: ContactDetails {
            name: "Camille Dubois".to_string(),
            email: "camille.dubois@example.be".to_string(),
            phone: "+32 470 12 34 56".to_string(),
        },
    }
}
