//! The Insurance Onboarding Platform architecture diagram.

use crate::canvas::Canvas;
use crate::fonts::FontSet;

pub const TITLE: &str = "Insurance Onboarding Platform - High-Level Architecture";

pub const TOPICS: &str = "Topics: user-info-submitted | documents-processed | kyc-verified | \
                          policy-recommended | workflow-completed | errors";

/// Draws the complete diagram onto `canvas`, top layer first.
pub fn render_fixed_diagram(canvas: &mut Canvas, fonts: &FontSet) {
    let theme = canvas.theme().clone();
    let line = theme.line_color.as_str();
    let stroke = theme.line_width;
    let frontend = theme.frontend.as_str();
    let api = theme.api.as_str();
    let streaming = theme.streaming.as_str();
    let storage = theme.storage.as_str();
    let external = theme.external.as_str();

    canvas.draw_text(50.0, 20.0, TITLE, &fonts.title);

    // Frontend
    canvas.draw_box(50.0, 100.0, 250.0, 80.0, "Angular 16 Frontend", frontend, &fonts.header);
    canvas.draw_box(350.0, 100.0, 250.0, 80.0, "Login Component", frontend, &fonts.header);
    canvas.draw_box(650.0, 100.0, 250.0, 80.0, "Onboarding Wizard", frontend, &fonts.header);
    canvas.draw_box(950.0, 100.0, 250.0, 80.0, "Real-time Updates", frontend, &fonts.header);

    canvas.draw_arrow(175.0, 180.0, 175.0, 240.0, line, stroke);
    canvas.draw_arrow(475.0, 180.0, 475.0, 240.0, line, stroke);
    canvas.draw_arrow(775.0, 180.0, 775.0, 240.0, line, stroke);
    canvas.draw_arrow(1075.0, 180.0, 1075.0, 240.0, line, stroke);

    // Gateways
    canvas.draw_box(50.0, 240.0, 400.0, 80.0, "API Gateway (REST)", api, &fonts.header);
    canvas.draw_box(500.0, 240.0, 400.0, 80.0, "API Gateway (WebSocket)", api, &fonts.header);

    canvas.draw_arrow(250.0, 320.0, 150.0, 380.0, line, stroke);
    canvas.draw_arrow(700.0, 320.0, 400.0, 380.0, line, stroke);
    canvas.draw_arrow(700.0, 320.0, 600.0, 380.0, line, stroke);
    canvas.draw_arrow(700.0, 320.0, 800.0, 380.0, line, stroke);

    // Lambda functions
    canvas.draw_box(50.0, 380.0, 180.0, 70.0, "Submit User\nInfo", api, &fonts.normal);
    canvas.draw_box(280.0, 380.0, 180.0, 70.0, "Process\nDocuments", api, &fonts.normal);
    canvas.draw_box(510.0, 380.0, 180.0, 70.0, "Perform\nKYC", api, &fonts.normal);
    canvas.draw_box(740.0, 380.0, 180.0, 70.0, "Generate\nPolicy Recs", api, &fonts.normal);

    canvas.draw_arrow(140.0, 450.0, 140.0, 510.0, line, stroke);
    canvas.draw_arrow(370.0, 450.0, 370.0, 510.0, line, stroke);
    canvas.draw_arrow(600.0, 450.0, 600.0, 510.0, line, stroke);
    canvas.draw_arrow(830.0, 450.0, 830.0, 510.0, line, stroke);

    canvas.draw_box(
        50.0,
        510.0,
        900.0,
        70.0,
        "Kafka Producer (Non-Blocking) \u{2192} Publishes Events to Topics",
        streaming,
        &fonts.header,
    );

    canvas.draw_arrow(500.0, 580.0, 500.0, 640.0, line, stroke);

    // Event streaming
    canvas.draw_box(
        150.0,
        640.0,
        700.0,
        80.0,
        "AWS MSK (Kafka Cluster) - 3 Brokers",
        streaming,
        &fonts.header,
    );
    canvas.draw_text(200.0, 700.0, TOPICS, &fonts.small);

    canvas.draw_arrow(250.0, 720.0, 250.0, 780.0, line, stroke);
    canvas.draw_arrow(500.0, 720.0, 500.0, 780.0, line, stroke);
    canvas.draw_arrow(750.0, 720.0, 750.0, 780.0, line, stroke);

    canvas.draw_box(100.0, 780.0, 280.0, 70.0, "Consumer: Event\nLogger", streaming, &fonts.normal);
    canvas.draw_box(
        430.0,
        780.0,
        280.0,
        70.0,
        "Consumer: WebSocket\nBroadcaster",
        streaming,
        &fonts.normal,
    );
    canvas.draw_box(760.0, 780.0, 280.0, 70.0, "Consumer: SNS\nNotifier", streaming, &fonts.normal);

    canvas.draw_arrow(250.0, 850.0, 250.0, 910.0, line, stroke);
    canvas.draw_arrow(570.0, 850.0, 350.0, 910.0, line, stroke);
    canvas.draw_arrow(900.0, 850.0, 900.0, 910.0, line, stroke);

    // Data and notification services
    canvas.draw_box(100.0, 910.0, 280.0, 70.0, "DynamoDB\n(8 Tables)", storage, &fonts.normal);
    canvas.draw_box(430.0, 910.0, 280.0, 70.0, "WebSocket API\n(Real-time)", streaming, &fonts.normal);
    canvas.draw_box(760.0, 910.0, 280.0, 70.0, "SNS\n(Notifications)", external, &fonts.normal);

    // Real-time updates flow back to the frontend.
    canvas.draw_arrow(570.0, 950.0, 1075.0, 150.0, line, stroke);

    // Legend
    canvas.draw_text(50.0, 1050.0, "Legend:", &fonts.header);
    let legend = [
        (50.0, frontend, "Frontend/UI"),
        (450.0, api, "APIs/Lambda"),
        (850.0, streaming, "Event Streaming"),
        (1250.0, storage, "Storage/Data"),
    ];
    for (x, color, label) in legend {
        canvas.draw_box(x, 1080.0, 100.0, 40.0, "", color, &fonts.normal);
        canvas.draw_text(x + 110.0, 1090.0, label, &fonts.normal);
    }

    tracing::debug!(primitives = canvas.primitives().len(), "diagram drawn");
}
