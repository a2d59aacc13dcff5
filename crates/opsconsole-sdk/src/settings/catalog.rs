//! Static catalog of known settings
//!
//! Pure data: the projection joins the server's raw settings against this
//! table to obtain labels, categories, types and editability.

use super::field::SettingKind;

/// Client-side metadata for one server setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub key: &'static str,
    pub label: &'static str,
    pub category: &'static str,
    pub kind: SettingKind,
    pub editable: bool,
    pub description: &'static str,
}

impl CatalogEntry {
    pub const fn new(
        key: &'static str,
        label: &'static str,
        category: &'static str,
        kind: SettingKind,
        editable: bool,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            label,
            category,
            kind,
            editable,
            description,
        }
    }
}

use SettingKind::*;

const RW: bool = true;
const RO: bool = false;

#[rustfmt::skip]
pub static SETTINGS_CATALOG: &[CatalogEntry] = &[
    // General
    CatalogEntry::new("app_name", "Application name", "General", Text, RW, "Name shown in the header and browser title"),
    CatalogEntry::new("app_url", "Application URL", "General", Url, RW, "Public URL used in links sent by email"),
    CatalogEntry::new("company_name", "Company name", "General", Text, RW, "Legal entity printed on generated documents"),
    CatalogEntry::new("support_email", "Support email", "General", Email, RW, "Address shown on error pages"),
    CatalogEntry::new("maintenance_banner", "Maintenance banner", "General", Text, RW, "Message displayed at the top of every page when set"),
    CatalogEntry::new("environment", "Environment", "General", Text, RO, "Deployment environment reported by the server"),
    CatalogEntry::new("app_version", "Version", "General", Text, RO, "Backend release currently running"),
    // Localization
    CatalogEntry::new("default_language", "Default language", "Localization", Text, RW, "Language for users without a preference"),
    CatalogEntry::new("default_timezone", "Default timezone", "Localization", Text, RW, "IANA timezone used for scheduling and reports"),
    CatalogEntry::new("date_format", "Date format", "Localization", Text, RW, "strftime pattern for displayed dates"),
    CatalogEntry::new("currency", "Currency", "Localization", Text, RW, "ISO 4217 code used for amounts"),
    CatalogEntry::new("measurement_system", "Measurement system", "Localization", Text, RW, "metric or imperial"),
    // Shipments
    CatalogEntry::new("shipment_reference_prefix", "Reference prefix", "Shipments", Text, RW, "Prefix of generated shipment references"),
    CatalogEntry::new("default_carrier", "Default carrier", "Shipments", Text, RW, "Carrier preselected on new shipments"),
    CatalogEntry::new("delay_threshold_hours", "Delay threshold (hours)", "Shipments", Number, RW, "Hours past ETA before a shipment is flagged delayed"),
    CatalogEntry::new("auto_close_delivered_days", "Auto-close after (days)", "Shipments", Number, RW, "Days after delivery before a shipment is archived"),
    CatalogEntry::new("tracking_refresh_minutes", "Tracking refresh (minutes)", "Shipments", Number, RW, "Polling interval for carrier tracking updates"),
    CatalogEntry::new("require_pod_upload", "Require proof of delivery", "Shipments", Boolean, RW, "Block closing a shipment without a signed POD"),
    CatalogEntry::new("max_packages_per_shipment", "Max packages per shipment", "Shipments", Number, RW, "Upper bound enforced by the shipment form"),
    CatalogEntry::new("shipment_statuses", "Statuses", "Shipments", List, RO, "Workflow statuses defined by the server"),
    // MOC
    CatalogEntry::new("moc_reference_prefix", "Reference prefix", "MOC", Text, RW, "Prefix of generated MOC request numbers"),
    CatalogEntry::new("moc_approval_levels", "Approval levels", "MOC", Number, RW, "Number of sign-offs required before implementation"),
    CatalogEntry::new("moc_review_deadline_days", "Review deadline (days)", "MOC", Number, RW, "Days reviewers have before escalation"),
    CatalogEntry::new("moc_require_risk_assessment", "Require risk assessment", "MOC", Boolean, RW, "Block submission without an attached risk assessment"),
    CatalogEntry::new("moc_auto_escalation", "Auto escalation", "MOC", Boolean, RW, "Escalate overdue reviews to the next approver"),
    CatalogEntry::new("moc_categories", "Categories", "MOC", List, RW, "Change categories offered on the request form"),
    // Documents
    CatalogEntry::new("max_upload_size_mb", "Max upload size (MB)", "Documents", Number, RW, "Largest file accepted by the document library"),
    CatalogEntry::new("allowed_file_types", "Allowed file types", "Documents", List, RW, "Extensions accepted on upload"),
    CatalogEntry::new("document_retention_days", "Retention (days)", "Documents", Number, RW, "Days before archived documents are purged"),
    CatalogEntry::new("enable_versioning", "Versioning", "Documents", Boolean, RW, "Keep previous revisions when a document is replaced"),
    CatalogEntry::new("ocr_enabled", "OCR", "Documents", Boolean, RW, "Extract text from scanned uploads"),
    CatalogEntry::new("watermark_text", "Watermark", "Documents", Text, RW, "Text stamped on exported PDFs"),
    // Email
    CatalogEntry::new("email_host", "Host", "Email", Text, RW, "SMTP server hostname"),
    CatalogEntry::new("email_port", "Port", "Email", Number, RW, "SMTP server port"),
    CatalogEntry::new("email_host_user", "Username", "Email", Text, RW, "SMTP login"),
    CatalogEntry::new("email_password", "Password", "Email", Password, RW, "SMTP password"),
    CatalogEntry::new("email_use_tls", "Use TLS", "Email", Boolean, RW, "STARTTLS on connect"),
    CatalogEntry::new("email_use_ssl", "Use SSL", "Email", Boolean, RW, "Implicit TLS; exclusive with STARTTLS"),
    CatalogEntry::new("default_from_email", "From address", "Email", Email, RW, "Sender of outgoing notifications"),
    CatalogEntry::new("email_timeout", "Timeout (seconds)", "Email", Number, RW, "SMTP socket timeout"),
    // Notifications
    CatalogEntry::new("notifications_enabled", "Email notifications", "Notifications", Boolean, RW, "Send workflow notifications by email"),
    CatalogEntry::new("push_notifications_enabled", "Push notifications", "Notifications", Boolean, RW, "Send browser push notifications"),
    CatalogEntry::new("digest_frequency", "Digest frequency", "Notifications", Text, RW, "daily, weekly or never"),
    CatalogEntry::new("sms_provider", "SMS provider", "Notifications", Text, RW, "Gateway used for SMS alerts"),
    CatalogEntry::new("sms_api_key", "SMS API key", "Notifications", Password, RW, "Credential for the SMS gateway"),
    CatalogEntry::new("notification_retention_days", "Retention (days)", "Notifications", Number, RW, "Days before read notifications are deleted"),
    // Security
    CatalogEntry::new("secret_key", "Secret key", "Security", Password, RO, "Server signing secret"),
    CatalogEntry::new("session_timeout_minutes", "Session timeout (minutes)", "Security", Number, RW, "Idle time before sign-out"),
    CatalogEntry::new("password_min_length", "Minimum password length", "Security", Number, RW, "Enforced on password change"),
    CatalogEntry::new("password_require_special", "Require special characters", "Security", Boolean, RW, "Passwords must contain a symbol"),
    CatalogEntry::new("max_login_attempts", "Max login attempts", "Security", Number, RW, "Failed attempts before lockout"),
    CatalogEntry::new("lockout_duration_minutes", "Lockout duration (minutes)", "Security", Number, RW, "How long a locked account stays locked"),
    CatalogEntry::new("allowed_hosts", "Allowed hosts", "Security", List, RO, "Host headers accepted by the server"),
    CatalogEntry::new("cors_allowed_origins", "CORS origins", "Security", List, RW, "Origins allowed to call the API from a browser"),
    // Authentication
    CatalogEntry::new("jwt_access_lifetime_minutes", "Access lifetime (minutes)", "Authentication", Number, RW, "Validity of issued access credentials"),
    CatalogEntry::new("jwt_refresh_lifetime_days", "Refresh lifetime (days)", "Authentication", Number, RW, "Validity of refresh credentials"),
    CatalogEntry::new("jwt_signing_key", "Signing key", "Authentication", Password, RO, "Key used to sign access credentials"),
    CatalogEntry::new("sso_enabled", "Single sign-on", "Authentication", Boolean, RW, "Allow sign-in through the identity provider"),
    CatalogEntry::new("oidc_client_id", "OIDC client ID", "Authentication", Text, RW, "Client identifier registered with the identity provider"),
    CatalogEntry::new("oidc_client_secret", "OIDC client secret", "Authentication", Password, RW, "Client secret registered with the identity provider"),
    // Storage
    CatalogEntry::new("storage_backend", "Storage backend", "Storage", Text, RW, "local or s3"),
    CatalogEntry::new("media_root", "Media root", "Storage", Text, RO, "Filesystem path for local storage"),
    CatalogEntry::new("aws_s3_bucket_name", "S3 bucket", "Storage", Text, RW, "Bucket holding uploaded files"),
    CatalogEntry::new("aws_s3_region", "S3 region", "Storage", Text, RW, "Region of the bucket"),
    CatalogEntry::new("aws_access_key_id", "Access key ID", "Storage", Text, RW, "S3 credential identifier"),
    CatalogEntry::new("aws_secret_access_key", "Secret access key", "Storage", Password, RW, "S3 credential secret"),
    // Task Queue
    CatalogEntry::new("celery_broker_url", "Broker URL", "Task Queue", Url, RW, "Message broker for background tasks"),
    CatalogEntry::new("celery_result_backend", "Result backend", "Task Queue", Url, RW, "Where task results are stored"),
    CatalogEntry::new("celery_worker_concurrency", "Worker concurrency", "Task Queue", Number, RW, "Processes per worker"),
    CatalogEntry::new("celery_task_time_limit", "Task time limit (seconds)", "Task Queue", Number, RW, "Hard limit before a task is killed"),
    CatalogEntry::new("celery_default_queue", "Default queue", "Task Queue", Text, RW, "Queue used when a task names none"),
    CatalogEntry::new("flower_url", "Monitor URL", "Task Queue", Url, RW, "Task monitor dashboard"),
    // Integrations
    CatalogEntry::new("erp_base_url", "ERP base URL", "Integrations", Url, RW, "Endpoint of the ERP connector"),
    CatalogEntry::new("erp_api_key", "ERP API key", "Integrations", Password, RW, "Credential for the ERP connector"),
    CatalogEntry::new("maps_api_key", "Maps API key", "Integrations", Password, RW, "Credential for route and map tiles"),
    CatalogEntry::new("webhook_url", "Webhook URL", "Integrations", Url, RW, "Receives shipment and MOC events"),
    CatalogEntry::new("webhook_auth_token", "Webhook auth token", "Integrations", Password, RW, "Bearer credential sent with webhook calls"),
    CatalogEntry::new("slack_webhook_url", "Slack webhook", "Integrations", Url, RW, "Incoming webhook for alert messages"),
    // Monitoring
    CatalogEntry::new("sentry_dsn", "Sentry DSN", "Monitoring", Url, RW, "Error reporting endpoint"),
    CatalogEntry::new("log_level", "Log level", "Monitoring", Text, RW, "Minimum level written to server logs"),
    CatalogEntry::new("log_retention_days", "Log retention (days)", "Monitoring", Number, RW, "Days before log files are rotated out"),
    CatalogEntry::new("metrics_enabled", "Metrics", "Monitoring", Boolean, RW, "Expose the metrics endpoint"),
    CatalogEntry::new("health_check_interval_seconds", "Health check interval (seconds)", "Monitoring", Number, RW, "Probe interval for dependent services"),
    // Maintenance
    CatalogEntry::new("maintenance_mode", "Maintenance mode", "Maintenance", Boolean, RW, "Reject non-admin sign-ins"),
    CatalogEntry::new("backup_enabled", "Backups", "Maintenance", Boolean, RW, "Run scheduled database backups"),
    CatalogEntry::new("backup_schedule", "Backup schedule", "Maintenance", Text, RW, "Cron expression for backups"),
    CatalogEntry::new("database_url", "Database URL", "Maintenance", Url, RO, "Primary database connection string"),
];

/// Catalog metadata for a setting key
pub fn lookup(key: &str) -> Option<&'static CatalogEntry> {
    find_entry(SETTINGS_CATALOG, key)
}

/// Entry for `key` in an arbitrary catalog
pub fn find_entry<'a>(catalog: &'a [CatalogEntry], key: &str) -> Option<&'a CatalogEntry> {
    catalog.iter().find(|entry| entry.key == key)
}
