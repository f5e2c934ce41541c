use std::collections::BTreeMap;
use std::fmt::Write;

use super::followup::{AdditionalFundsRequest, ContactRequest, EarlyRepaymentRequest};
use super::repository::{CreditRequestRecord, NotificationTemplate, RequestNotification};
use crate::format::{format_currency, format_percentage};

const RULE: &str = "============================================";
const FOOTER: &str = "Sent from the Wallfin client area.";

/// Advisor message for a freshly submitted credit request.
pub fn render_credit_request(record: &CreditRequestRecord) -> RequestNotification {
    let submission = &record.submission;
    let estimate = &record.quote.estimate;
    let assessment = &record.quote.assessment;
    let charges = &submission.charges;

    let mut body = String::new();
    let _ = writeln!(body, "NEW CREDIT REQUEST - {}", record.request_number);
    let _ = writeln!(body, "{RULE}");
    let _ = writeln!(body, "Client: {}", submission.contact.name);
    let _ = writeln!(body);
    let _ = writeln!(body, "1. PROJECT");
    let _ = writeln!(body, "Credit type: {}", submission.credit_type.label());
    let _ = writeln!(body, "Amount: {}", format_currency(submission.amount));
    let _ = writeln!(body, "Duration: {} months", submission.duration_months);
    let _ = writeln!(
        body,
        "Description: {}",
        submission
            .project_description
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .unwrap_or("not provided")
    );
    let _ = writeln!(body);
    let _ = writeln!(body, "2. SITUATION");
    let _ = writeln!(body, "Employment: {}", submission.employment_status.label());
    let _ = writeln!(
        body,
        "Net monthly income: {}",
        format_currency(submission.monthly_income)
    );
    let _ = writeln!(body, "Family status: {}", submission.family_status.label());
    let _ = writeln!(body, "Household size: {}", submission.household_size);
    let _ = writeln!(body);
    let _ = writeln!(body, "3. CURRENT CHARGES");
    let _ = writeln!(body, "Rent/mortgage: {}", format_currency(charges.rent_mortgage));
    let _ = writeln!(body, "Current credits: {}", format_currency(charges.current_credits));
    let _ = writeln!(body, "Other charges: {}", format_currency(charges.other_charges));
    let _ = writeln!(
        body,
        "TOTAL CHARGES: {}",
        charges
            .total()
            .map_or_else(|| "out of range".to_string(), format_currency)
    );
    let _ = writeln!(body);
    let _ = writeln!(body, "4. FINANCIAL ANALYSIS");
    let _ = writeln!(body, "Estimated installment: {}", format_currency(estimate.payment));
    let _ = writeln!(body, "APR: {}", format_percentage(estimate.apr));
    let _ = writeln!(
        body,
        "Debt ratio: {}",
        format_percentage(assessment.debt_ratio_percent)
    );
    let _ = writeln!(
        body,
        "Residual income: {}",
        format_currency(assessment.residual_income)
    );
    let _ = writeln!(body, "Feasibility: {}", assessment.status.label());
    let _ = writeln!(body);
    let _ = writeln!(body, "5. CONTACT");
    let _ = writeln!(body, "Name: {}", submission.contact.name);
    let _ = writeln!(body, "E-mail: {}", submission.contact.email);
    let _ = writeln!(body, "Phone: {}", submission.contact.phone);
    let _ = writeln!(body, "{RULE}");
    let _ = write!(body, "{FOOTER}");

    let mut details = BTreeMap::new();
    details.insert("amount".to_string(), submission.amount.to_string());
    details.insert(
        "duration_months".to_string(),
        submission.duration_months.to_string(),
    );
    details.insert("payment".to_string(), estimate.payment.to_string());
    details.insert("apr".to_string(), estimate.apr.to_string());
    details.insert(
        "debt_ratio_percent".to_string(),
        assessment.debt_ratio_percent.to_string(),
    );
    details.insert(
        "residual_income".to_string(),
        assessment.residual_income.to_string(),
    );
    details.insert("status".to_string(), assessment.status.code().to_string());

    RequestNotification {
        template: NotificationTemplate::CreditRequest,
        reference: record.request_number.to_string(),
        subject: format!(
            "New credit request {} - {}",
            record.request_number, submission.contact.name
        ),
        body,
        details,
    }
}

pub fn render_additional_funds(request: &AdditionalFundsRequest) -> RequestNotification {
    let mut body = String::new();
    let _ = writeln!(body, "ADDITIONAL FUNDS REQUEST");
    let _ = writeln!(body, "{RULE}");
    let _ = writeln!(body, "Client: {}", request.client_name);
    let _ = writeln!(body, "E-mail: {}", request.client_email);
    let _ = writeln!(body);
    let _ = writeln!(body, "Credit:");
    let _ = writeln!(body, "- Type: {}", request.credit_type.label());
    let _ = writeln!(body, "- Reference: {}", request.credit_reference);
    let _ = writeln!(body);
    let _ = writeln!(body, "Requested amount: {}", format_currency(request.amount));
    let _ = writeln!(body);
    let _ = writeln!(body, "Comment:");
    let _ = writeln!(body, "{}", comment_or_default(request.comment.as_deref()));
    let _ = writeln!(body, "{RULE}");
    let _ = write!(body, "{FOOTER}");

    let mut details = BTreeMap::new();
    details.insert("amount".to_string(), request.amount.to_string());
    details.insert("client_email".to_string(), request.client_email.clone());

    RequestNotification {
        template: NotificationTemplate::AdditionalFunds,
        reference: request.credit_reference.clone(),
        subject: format!(
            "Additional funds request - {} - {}",
            request.credit_reference, request.client_name
        ),
        body,
        details,
    }
}

pub fn render_early_repayment(request: &EarlyRepaymentRequest) -> RequestNotification {
    let mut body = String::new();
    let _ = writeln!(body, "EARLY REPAYMENT REQUEST");
    let _ = writeln!(body, "{RULE}");
    let _ = writeln!(body, "Client: {}", request.client_name);
    let _ = writeln!(body, "E-mail: {}", request.client_email);
    let _ = writeln!(body);
    let _ = writeln!(body, "Credit:");
    let _ = writeln!(body, "- Type: {}", request.credit_type.label());
    let _ = writeln!(body, "- Reference: {}", request.credit_reference);
    let _ = writeln!(
        body,
        "- Remaining balance: {}",
        format_currency(request.remaining_balance)
    );
    let _ = writeln!(body);
    let _ = writeln!(body, "Repayment type: {}", request.repayment_type.label());
    let _ = writeln!(body, "Amount: {}", format_currency(request.amount));
    let _ = writeln!(body);
    let _ = writeln!(body, "Comment:");
    let _ = writeln!(body, "{}", comment_or_default(request.comment.as_deref()));
    let _ = writeln!(body, "{RULE}");
    let _ = write!(body, "{FOOTER}");

    let mut details = BTreeMap::new();
    details.insert("amount".to_string(), request.amount.to_string());
    details.insert(
        "remaining_balance".to_string(),
        request.remaining_balance.to_string(),
    );
    details.insert(
        "repayment_type".to_string(),
        request.repayment_type.label().to_string(),
    );

    RequestNotification {
        template: NotificationTemplate::EarlyRepayment,
        reference: request.credit_reference.clone(),
        subject: format!(
            "Early repayment request ({}) - {} - {}",
            request.repayment_type.label(),
            request.credit_reference,
            request.client_name
        ),
        body,
        details,
    }
}

/// Advisor message for a customer's free-form contact request.
pub fn render_contact_request(request: &ContactRequest) -> RequestNotification {
    let phone = request
        .client_phone
        .as_deref()
        .filter(|phone| !phone.trim().is_empty())
        .unwrap_or("not provided");

    let mut body = String::new();
    let _ = writeln!(body, "CONTACT REQUEST");
    let _ = writeln!(body, "{RULE}");
    let _ = writeln!(body, "Client:");
    let _ = writeln!(body, "Name: {}", request.client_name);
    let _ = writeln!(body, "E-mail: {}", request.client_email);
    let _ = writeln!(body, "Phone: {phone}");
    let _ = writeln!(body);
    let _ = writeln!(body, "Subject: {}", request.subject.trim());
    if let Some(reference) = request.credit_reference() {
        let _ = writeln!(body, "Credit concerned: {reference}");
    }
    let _ = writeln!(body);
    let _ = writeln!(body, "Message:");
    let _ = writeln!(body, "{}", request.message.trim());
    let _ = writeln!(body, "{RULE}");
    let _ = write!(body, "{FOOTER}");

    let mut details = BTreeMap::new();
    details.insert("client_email".to_string(), request.client_email.clone());
    details.insert("subject".to_string(), request.subject.trim().to_string());
    if let Some(reference) = request.credit_reference() {
        details.insert("credit_reference".to_string(), reference.to_string());
    }

    RequestNotification {
        template: NotificationTemplate::ContactRequest,
        reference: request
            .credit_reference()
            .unwrap_or(&request.client_email)
            .to_string(),
        subject: format!(
            "Contact request - {} - {}",
            request.subject.trim(),
            request.client_name
        ),
        body,
        details,
    }
}

fn comment_or_default(comment: Option<&str>) -> &str {
    comment
        .filter(|text| !text.trim().is_empty())
        .unwrap_or("No comment")
}
