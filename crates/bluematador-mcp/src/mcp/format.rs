//! Markdown rendering for events and resources
//!
//! Events are rendered as compact markdown blocks with an icon keyed off the
//! resource type so long event lists stay scannable.

use bluematador_client::{Event, EventSource};
use std::fmt::Write;

/// Tag keys shown before everything else
const IMPORTANT_TAGS: &[&str] = &["Name", "Environment", "Project", "Owner", "Application"];

/// Icon and human name for the service a resource reference points at
pub fn resource_type_info(source: &EventSource) -> (&'static str, &'static str) {
    let arn = source
        .resource_ref
        .as_ref()
        .map(|r| r.arn.as_str())
        .unwrap_or("");

    if arn.contains(":ec2:") {
        if arn.contains(":instance/") {
            return ("🖥️", "EC2 Instance");
        }
        if arn.contains(":volume/") {
            return ("💾", "EBS Volume");
        }
        if arn.contains(":security-group/") {
            return ("🛡️", "Security Group");
        }
        if arn.contains(":vpc/") {
            return ("🌐", "VPC");
        }
        if arn.contains(":subnet/") {
            return ("🔀", "Subnet");
        }
    }

    if arn.contains(":rds:") {
        return ("🗄️", "RDS Database");
    }
    if arn.contains(":s3:") {
        return ("🪣", "S3 Bucket");
    }
    if arn.contains(":sqs:") {
        return ("📬", "SQS Queue");
    }
    if arn.contains(":lambda:") {
        return ("⚡", "Lambda Function");
    }
    if arn.contains(":route53:") {
        return ("🌍", "Route53 Zone");
    }
    if arn.contains(":elasticloadbalancing:") {
        return ("⚖️", "Load Balancer");
    }
    if arn.contains(":ecs:") {
        return ("📦", "ECS Service");
    }
    if arn.contains(":eks:") {
        return ("☸️", "EKS Cluster");
    }
    if arn.contains(":cloudfront:") {
        return ("🌐", "CloudFront Distribution");
    }
    if arn.contains(":sns:") {
        return ("📢", "SNS Topic");
    }
    if arn.contains(":dynamodb:") {
        return ("⚡", "DynamoDB Table");
    }
    if arn.contains(":redshift:") {
        return ("🔺", "Redshift Cluster");
    }

    if arn.contains("/Microsoft.Compute/virtualMachines/") {
        return ("🖥️", "Azure VM");
    }
    if arn.contains("/Microsoft.Storage/storageAccounts/") {
        return ("🪣", "Storage Account");
    }
    if arn.contains("/Microsoft.Sql/servers/") {
        return ("🗄️", "Azure SQL");
    }
    if arn.contains("/Microsoft.Web/sites/") {
        return ("🌐", "App Service");
    }
    if arn.contains("/Microsoft.ContainerService/") {
        return ("☸️", "AKS Cluster");
    }
    if arn.contains("/Microsoft.Network/") {
        return ("🔀", "Network Resource");
    }

    if arn.contains("azure") {
        return ("🔷", "Azure Resource");
    }
    if arn.contains("aws") {
        return ("🟠", "AWS Resource");
    }

    ("🔍", "Resource")
}

/// Render the resource block for an event: type line, ARN or Azure ID,
/// tags (important keys first), and any extra descriptive text.
pub fn format_resource_info(source: Option<&EventSource>) -> String {
    let Some(source) = source else {
        return "🔍 Resource: Unknown".to_string();
    };

    let (icon, service_type) = resource_type_info(source);
    let label = source
        .label
        .as_deref()
        .or(source.text.as_deref())
        .unwrap_or("Unknown");
    let mut info = format!("{icon} **{service_type}:** {label}\n");

    if let Some(reference) = &source.resource_ref {
        let ref_type = reference.ref_type.as_deref().unwrap_or("resource");
        let is_azure =
            ref_type.to_lowercase().contains("azure") || reference.arn.contains("azure");
        let (arn_icon, arn_label) = if is_azure {
            ("🔷", "Azure ID")
        } else {
            ("🟠", "ARN")
        };
        let _ = write!(info, "{arn_icon} **{arn_label}:** {}\n", reference.arn);
    }

    if !source.tags.is_empty() {
        let (important, other): (Vec<_>, Vec<_>) = source
            .tags
            .iter()
            .partition(|tag| IMPORTANT_TAGS.contains(&tag.key.as_str()));
        let tag_list = important
            .iter()
            .chain(other.iter())
            .map(|tag| format!("{}={}", tag.key, tag.value))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = write!(info, "🏷️ **Tags:** {tag_list}\n");
    }

    if let Some(text) = &source.text {
        if source.label.as_deref() != Some(text.as_str()) {
            let _ = write!(info, "📋 **Details:** {text}");
        }
    }

    info.trim_end().to_string()
}

/// Render one event as a markdown block
pub fn format_event(event: &Event) -> String {
    let resource_info = format_resource_info(event.source.as_ref());
    let mut block = format!(
        "**{}** ({})\n📝 {}\n🕒 Opened: {}\n{}\n🆔 Event ID: {}",
        event.type_text, event.severity, event.summary_text, event.opened, resource_info, event.id,
    );
    if event.muted {
        block.push_str("\n🔇 Muted");
    }
    if event.hidden {
        block.push_str("\n👁️ Hidden");
    }
    block
}

/// Render a list of events, separated by horizontal rules
pub fn format_events(events: &[Event]) -> String {
    events
        .iter()
        .map(format_event)
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use bluematador_client::{ResourceRef, Tag};

    fn source(arn: &str) -> EventSource {
        EventSource {
            label: Some("orders-queue".to_string()),
            text: None,
            resource_ref: Some(ResourceRef {
                arn: arn.to_string(),
                ref_type: Some("aws_arn".to_string()),
            }),
            tags: Vec::new(),
        }
    }

    #[test]
    fn sqs_arns_get_the_queue_icon() {
        let (icon, service) = resource_type_info(&source("arn:aws:sqs:us-east-1:1:orders"));
        assert_eq!(icon, "📬");
        assert_eq!(service, "SQS Queue");
    }

    #[test]
    fn azure_resources_show_azure_id() {
        let mut src = source("/subscriptions/s/resourceGroups/rg/providers/Microsoft.Compute/virtualMachines/vm1");
        src.resource_ref.as_mut().unwrap().ref_type = Some("azure_id".to_string());
        let info = format_resource_info(Some(&src));
        assert!(info.contains("🖥️ **Azure VM:** orders-queue"));
        assert!(info.contains("🔷 **Azure ID:**"));
    }

    #[test]
    fn missing_source_falls_back_to_unknown() {
        assert_eq!(format_resource_info(None), "🔍 Resource: Unknown");
    }

    #[test]
    fn important_tags_sort_first() {
        let mut src = source("arn:aws:rds:us-east-1:1:db:prod");
        src.tags = vec![
            Tag {
                key: "team".to_string(),
                value: "core".to_string(),
            },
            Tag {
                key: "Environment".to_string(),
                value: "prod".to_string(),
            },
        ];
        let info = format_resource_info(Some(&src));
        assert!(info.contains("🏷️ **Tags:** Environment=prod, team=core"));
    }

    #[test]
    fn muted_and_hidden_flags_render() {
        let event = Event {
            id: "e-1".to_string(),
            type_text: "High CPU".to_string(),
            severity: "alert".to_string(),
            summary_text: "CPU above 90%".to_string(),
            opened: "2024-05-01T00:00:00Z".to_string(),
            muted: true,
            hidden: true,
            source: None,
        };
        let block = format_event(&event);
        assert!(block.starts_with("**High CPU** (alert)"));
        assert!(block.contains("🔇 Muted"));
        assert!(block.contains("👁️ Hidden"));
    }

    #[test]
    fn details_line_omitted_when_text_matches_label() {
        let mut src = source("arn:aws:sqs:us-east-1:1:orders");
        src.text = Some("orders-queue".to_string());
        let info = format_resource_info(Some(&src));
        assert!(!info.contains("📋 **Details:**"));
    }
}
