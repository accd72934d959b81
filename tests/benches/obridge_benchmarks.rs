//! # OBridge Benchmarks
//!
//! | Operation | Target |
//! |-----------|--------|
//! | Transfer id derivation | < 5µs |
//! | Hashlock check (each scheme) | < 5µs |
//! | Lock + confirm cycle | < 50µs |
//! | Lock throughput into a populated registry | linear |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use obridge_core::algorithms::local_to_foreign;
use obridge_core::{
    create_hashlock, derive_transfer_id, verify_preimage, Address, Asset, BidId,
    BroadcastEventBus, ChainId, HashlockScheme, InMemoryLedger, ManualClock, ObridgeApi,
    ObridgeService, OutboundRoute, TransferParams, TransferTerms,
};
use primitive_types::U256;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

type BenchService = ObridgeService<Arc<InMemoryLedger>, Arc<ManualClock>, Arc<BroadcastEventBus>>;

fn user() -> Address {
    Address::repeat_byte(0x01)
}

fn lp() -> Address {
    Address::repeat_byte(0x02)
}

fn token() -> Address {
    Address::repeat_byte(0xA0)
}

fn route(bid: u64) -> OutboundRoute {
    OutboundRoute {
        dst_chain_id: ChainId(56),
        dst_receiver: local_to_foreign(&user()),
        bid_id: BidId(bid),
        dst_asset: local_to_foreign(&Address::repeat_byte(0xB0)),
        dst_amount: U256::exp10(15),
    }
}

fn terms(hashlock: [u8; 32]) -> TransferTerms {
    TransferTerms::new(
        user(),
        lp(),
        Asset::Token(token()),
        U256::from(1_000u64),
        hashlock,
        ManualClock::GENESIS + 86_400,
    )
}

/// Funded service whose user can lock `locks` transfers.
fn funded_service(locks: u64) -> BenchService {
    let ledger = Arc::new(InMemoryLedger::new(Address::repeat_byte(0xCC)));
    let total = U256::from(1_000u64) * U256::from(locks.max(1));
    ledger.mint(token(), user(), total);
    ledger.approve(token(), user(), total);
    // No subscribers: publishing must not block or buffer.
    ObridgeService::new(
        ledger,
        Arc::new(ManualClock::new()),
        Arc::new(BroadcastEventBus::new(16)),
    )
}

// ============================================================================
// Identifier and hashlock
// ============================================================================

fn bench_transfer_id(c: &mut Criterion) {
    let mut group = c.benchmark_group("obridge-transfer-id");
    let params = TransferParams::outbound(terms([0xAB; 32]), route(1));

    group.bench_function("derive_outbound", |b| {
        b.iter(|| black_box(derive_transfer_id(black_box(&params))))
    });
    group.finish();
}

fn bench_hashlock(c: &mut Criterion) {
    let mut group = c.benchmark_group("obridge-hashlock");
    let preimage: [u8; 32] = rand::thread_rng().gen();

    for scheme in [
        HashlockScheme::Sha256,
        HashlockScheme::Sha3_256,
        HashlockScheme::Keccak256,
    ] {
        let hashlock = create_hashlock(&preimage, scheme);
        group.bench_with_input(
            BenchmarkId::new("verify_preimage", scheme.as_str()),
            &hashlock,
            |b, hashlock| b.iter(|| black_box(verify_preimage(&preimage, hashlock, scheme))),
        );
    }
    group.finish();
}

// ============================================================================
// State machine
// ============================================================================

fn bench_lock_confirm_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("obridge-lifecycle");
    group.measurement_time(Duration::from_secs(10));

    let preimage: [u8; 32] = rand::thread_rng().gen();
    let hashlock = create_hashlock(&preimage, HashlockScheme::Keccak256);

    group.bench_function("lock_then_confirm", |b| {
        b.iter_batched(
            || funded_service(1),
            |service| {
                let locked = service
                    .lock_outbound(terms(hashlock), route(1), U256::zero())
                    .unwrap();
                black_box(service.confirm(&locked.params, preimage).unwrap())
            },
            criterion::BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_lock_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("obridge-lock-throughput");

    for size in [100u64, 1_000, 10_000] {
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::new("lock_outbound", size), &size, |b, &size| {
            b.iter_batched(
                || funded_service(size),
                |service| {
                    for bid in 0..size {
                        service
                            .lock_outbound(terms([0x11; 32]), route(bid), U256::zero())
                            .unwrap();
                    }
                    black_box(service.transfer_count())
                },
                criterion::BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_transfer_id,
    bench_hashlock,
    bench_lock_confirm_cycle,
    bench_lock_throughput
);
criterion_main!(benches);
