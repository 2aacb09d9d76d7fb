//! Plain-text rendering of notification emails.

use chrono::Utc;
use nexus_models::ApplicationStatus;

use crate::Notification;

/// A rendered message ready for the transport.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Human-readable phrase for an application status, used in the status-update
/// email body.
pub fn status_message(status: ApplicationStatus) -> &'static str {
    match status {
        ApplicationStatus::Pending => "is being reviewed",
        ApplicationStatus::Reviewed => "has been reviewed",
        ApplicationStatus::Interviewed => "has moved to the interview stage",
        ApplicationStatus::Rejected => "was not selected",
        ApplicationStatus::Offered => "has resulted in a job offer",
        ApplicationStatus::Hired => "has been accepted and you have been hired",
    }
}

/// Render a notification against the front-end base URL.
pub fn render(note: &Notification, client_url: &str) -> Rendered {
    let client_url = client_url.trim_end_matches('/');
    let today = Utc::now().format("%Y-%m-%d");

    match note {
        Notification::ApplicationSubmitted {
            to,
            applicant_name,
            job_id,
            job_title,
            company,
        } => Rendered {
            to: to.clone(),
            subject: format!("Application Submitted: {job_title} at {company}"),
            body: format!(
                "Hi {applicant_name},\n\n\
                 Your application for {job_title} at {company} was submitted on {today}.\n\n\
                 View the job: {client_url}/jobs/{job_id}\n\
                 Track your applications: {client_url}/applied-jobs\n"
            ),
        },
        Notification::ApplicationReceived {
            to,
            employer_name,
            job_id,
            job_title,
            applicant_name,
            applicant_email,
        } => Rendered {
            to: to.clone(),
            subject: format!("New Application: {job_title}"),
            body: format!(
                "Hi {employer_name},\n\n\
                 {applicant_name} ({applicant_email}) applied for {job_title} on {today}.\n\n\
                 Review applicants: {client_url}/job/{job_id}/applicants\n"
            ),
        },
        Notification::StatusChanged {
            to,
            applicant_name,
            job_id,
            job_title,
            company,
            status,
        } => Rendered {
            to: to.clone(),
            subject: format!("Application Status Update: {job_title} at {company}"),
            body: format!(
                "Hi {applicant_name},\n\n\
                 Your application for {job_title} at {company} {}.\n\n\
                 View the job: {client_url}/jobs/{job_id}\n\
                 Track your applications: {client_url}/applied-jobs\n",
                status_message(*status)
            ),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nexus_models::JobId;

    #[test]
    fn test_status_messages() {
        assert_eq!(status_message(ApplicationStatus::Pending), "is being reviewed");
        assert_eq!(status_message(ApplicationStatus::Rejected), "was not selected");
        assert_eq!(
            status_message(ApplicationStatus::Hired),
            "has been accepted and you have been hired"
        );
    }

    #[test]
    fn test_confirmation_render() {
        let note = Notification::ApplicationSubmitted {
            to: "ada@example.com".to_string(),
            applicant_name: "Ada".to_string(),
            job_id: JobId::from("job-1"),
            job_title: "Backend Engineer".to_string(),
            company: "Acme".to_string(),
        };
        let rendered = render(&note, "https://jobs.example.com/");
        assert_eq!(rendered.to, "ada@example.com");
        assert_eq!(rendered.subject, "Application Submitted: Backend Engineer at Acme");
        assert!(rendered.body.contains("https://jobs.example.com/jobs/job-1"));
        assert!(rendered.body.contains("/applied-jobs"));
    }

    #[test]
    fn test_status_update_render() {
        let note = Notification::StatusChanged {
            to: "ada@example.com".to_string(),
            applicant_name: "Ada".to_string(),
            job_id: JobId::from("job-1"),
            job_title: "Backend Engineer".to_string(),
            company: "Acme".to_string(),
            status: ApplicationStatus::Interviewed,
        };
        let rendered = render(&note, "https://jobs.example.com");
        assert!(rendered.body.contains("has moved to the interview stage"));
        assert!(rendered.subject.contains("Status Update"));
    }

    #[test]
    fn test_employer_notification_render() {
        let note = Notification::ApplicationReceived {
            to: "hr@acme.com".to_string(),
            employer_name: "Grace".to_string(),
            job_id: JobId::from("job-2"),
            job_title: "SRE".to_string(),
            applicant_name: "Ada Lovelace".to_string(),
            applicant_email: "ada@example.com".to_string(),
        };
        let rendered = render(&note, "https://jobs.example.com");
        assert_eq!(rendered.subject, "New Application: SRE");
        assert!(rendered.body.contains("ada@example.com"));
        assert!(rendered.body.contains("/job/job-2/applicants"));
    }
}
