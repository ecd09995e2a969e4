use std::time::Duration;

use tablejudge_ai::create_agent;
use tablejudge_engine::judge::{Judge, JudgeConfig};
use tablejudge_engine::table::{Blinds, Table};

fn config(seed: u64) -> JudgeConfig {
    JudgeConfig {
        buy_in: 500,
        small_blind: None,
        big_blind: 10,
        time_limit: Duration::from_millis(500),
        hand_limit: Some(150),
        display: false,
        seed: Some(seed),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn mixed_table_tournament_conserves_chips() {
    let agents = ["baseline", "random", "call", "random-nofold"]
        .iter()
        .enumerate()
        .map(|(i, name)| create_agent(name, 100 + i as u64).unwrap())
        .collect();
    let mut judge = Judge::new(agents, config(5)).unwrap();
    let standings = judge.run_tournament(3).await.unwrap();

    assert_eq!(standings.games().len(), 3);
    for game in standings.games() {
        assert_eq!(game.chips.iter().sum::<u32>(), 2000);
    }
    let total: u64 = standings.seats().iter().map(|s| s.chips).sum();
    assert_eq!(total, 6000);
    // none of these agents ever answers late or illegally
    assert!(standings.seats().iter().all(|s| s.stats.substituted() == 0));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn illegal_agent_is_always_substituted() {
    let agents = vec![
        create_agent("illegal", 0).unwrap(),
        create_agent("call", 0).unwrap(),
    ];
    let mut judge = Judge::new(agents, config(9)).unwrap();
    judge.run_hands(5).await.unwrap();
    let stats = judge.stats()[0];
    assert!(stats.decisions > 0);
    assert_eq!(stats.invalid, stats.decisions);
    assert_eq!(judge.stats()[1].invalid, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn slow_agent_times_out_every_decision() {
    let agents = vec![
        create_agent("slow:200", 0).unwrap(),
        create_agent("call", 0).unwrap(),
    ];
    let cfg = JudgeConfig {
        time_limit: Duration::from_millis(20),
        ..config(3)
    };
    let mut judge = Judge::new(agents, cfg).unwrap();
    judge.run_hands(2).await.unwrap();
    let stats = judge.stats()[0];
    assert!(stats.decisions > 0);
    assert_eq!(stats.timeouts, stats.decisions);
}

#[test]
fn baseline_plays_synchronously_on_a_table() {
    let agent = create_agent("baseline", 0).unwrap();
    let mut table = Table::new(3, 300, Blinds::from_big(10), 21);
    for _ in 0..20 {
        if table.seats_with_chips() < 2 {
            break;
        }
        table
            .play_hand_with(|snap, legal| agent.decide(snap, legal).unwrap_or(legal.fallback()))
            .unwrap();
        assert_eq!(table.total_chips(), 900);
    }
}
