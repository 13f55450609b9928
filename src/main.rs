use dutchpay::api::http::HttpSettlementApi;
use dutchpay::config::CONFIG;
use dutchpay::resolver::LinkResolver;
use dutchpay::transfer::{FocusSignal, LogSchemeLauncher, TransferLauncher, TransferState};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(CONFIG.log_level.as_str())
        .init();

    let mut args = std::env::args().skip(1);
    let Some(link) = args.next() else {
        eprintln!("usage: dutchpay <settlement-link> [bank]");
        std::process::exit(2);
    };
    let bank = args.next();

    let api = Arc::new(HttpSettlementApi::new()?);
    let resolver = LinkResolver::new(api);

    info!("Resolving settlement link {}", link);
    let view = resolver.resolve_meeting(&link).await?;

    println!("{}의 정산 요청이 왔습니다.", view.meeting_name);
    println!("정산금액  {}원", view.total_display);
    println!("정산 인원 {}명", view.num_people);
    println!("최종금액  {}원", view.per_person_display);
    println!("[{}]에게 {}(으)로 송금하세요.", view.payer, view.transfer_target());

    if let Some(bank) = bank {
        let focus = FocusSignal::new();
        let mut launcher = TransferLauncher::new(LogSchemeLauncher, link.clone());
        launcher.launch(&bank, &focus)?;
        if let TransferState::Armed(intent) = launcher.state() {
            println!("송금 딥링크: {}", intent.scheme);
        }
    }

    Ok(())
}
