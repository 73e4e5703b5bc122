mod common;
use anyhow::Result;
use common::{run_episodes, TwoDoors, TwoDoorsConfig, END, LEFT, START};
use floe_agents::{
    explorer::{EpsilonGreedy, EpsilonSchedule},
    monte_carlo::{MonteCarlo, MonteCarloConfig},
    td_lambda::{TdLambda, TdLambdaConfig},
    td_zero::{TdZero, TdZeroConfig},
};
use floe_core::{error::AgentError, Agent, Configurable, Env, Policy};

fn env() -> Result<TwoDoors> {
    TwoDoors::build(&TwoDoorsConfig::new(0.5, 0.5), 0)
}

fn agents() -> Result<Vec<(&'static str, Box<dyn Agent<TwoDoors>>)>> {
    Ok(vec![
        (
            "monte carlo",
            Box::new(MonteCarlo::<TwoDoors>::build(
                MonteCarloConfig::default().init_value(1.0),
            )?),
        ),
        (
            "td(0)",
            Box::new(TdZero::<TwoDoors>::build(
                TdZeroConfig::default().init_value(1.0),
            )?),
        ),
        (
            "td(lambda)",
            Box::new(TdLambda::<TwoDoors>::build(
                TdLambdaConfig::default().init_value(1.0),
            )?),
        ),
    ])
}

#[test]
fn test_uninitialized() -> Result<()> {
    for (name, mut agent) in agents()? {
        assert_eq!(agent.start_episode(), Err(AgentError::Uninitialized), "{}", name);
        assert_eq!(agent.observe(START), Err(AgentError::Uninitialized), "{}", name);
        assert_eq!(agent.finish_episode(END), Err(AgentError::Uninitialized), "{}", name);
        assert_eq!(agent.sample(START), Err(AgentError::Uninitialized), "{}", name);
        assert_eq!(agent.dump_values(), Err(AgentError::Uninitialized), "{}", name);
    }
    Ok(())
}

#[test]
fn test_sequencing_errors() -> Result<()> {
    let env = env()?;
    for (name, mut agent) in agents()? {
        agent.start_environment(&env)?;
        assert_eq!(agent.observe(START), Err(AgentError::EpisodeNotStarted), "{}", name);
        assert_eq!(agent.finish_episode(END), Err(AgentError::EpisodeNotStarted), "{}", name);

        agent.start_episode()?;
        assert_eq!(agent.get_next_action(), Err(AgentError::MissingObservation), "{}", name);
        assert_eq!(agent.receive_reward(1.0), Err(AgentError::MissingAction), "{}", name);

        agent.observe(START)?;
        agent.get_next_action()?;
        assert_eq!(agent.get_next_action(), Err(AgentError::MissingObservation), "{}", name);
        assert_eq!(agent.finish_episode(END), Err(AgentError::MissingReward), "{}", name);
        agent.receive_reward(0.0)?;
        agent.finish_episode(END)?;

        // the episode is closed by finish_episode
        assert_eq!(agent.observe(START), Err(AgentError::EpisodeNotStarted), "{}", name);
    }
    Ok(())
}

#[test]
fn test_out_of_range() -> Result<()> {
    let env = env()?;
    for (name, mut agent) in agents()? {
        agent.start_environment(&env)?;
        agent.start_episode()?;
        let err = AgentError::StateOutOfRange {
            state: 2,
            n_states: 2,
        };
        assert_eq!(agent.observe(2), Err(err.clone()), "{}", name);
        assert_eq!(agent.finish_episode(2), Err(err.clone()), "{}", name);
        assert_eq!(agent.sample(2), Err(err), "{}", name);
        assert_eq!(agent.dump_values()?.len(), 2, "{}", name);
    }
    Ok(())
}

#[test]
fn test_terminal_row_is_zero_after_every_episode() -> Result<()> {
    let mut env = env()?;
    for (name, mut agent) in agents()? {
        agent.start_environment(&env)?;
        for _ in 0..50 {
            agent.start_episode()?;
            let mut obs = env.reset()?;
            loop {
                agent.observe(obs)?;
                let step = env.step(agent.get_next_action()?)?;
                agent.receive_reward(step.reward)?;
                obs = step.obs;
                if step.is_done() {
                    break;
                }
            }
            agent.finish_episode(obs)?;
            assert_eq!(agent.dump_values()?[END], vec![0.0, 0.0], "{}", name);
        }
        // the optimistic initial values of START have been moved by the updates
        assert!(agent.dump_values()?[START].iter().any(|v| *v < 1.0), "{}", name);
    }
    Ok(())
}

#[test]
fn test_truncated_episode_zeroes_last_state() -> Result<()> {
    let env = env()?;
    for (name, mut agent) in agents()? {
        agent.start_environment(&env)?;
        agent.start_episode()?;
        agent.observe(START)?;
        agent.get_next_action()?;
        agent.receive_reward(1.0)?;
        assert_eq!(agent.finish_episode(START)?, 1.0, "{}", name);
        assert_eq!(agent.dump_values()?[START], vec![0.0, 0.0], "{}", name);
        assert_eq!(agent.dump_values()?[END], vec![1.0, 1.0], "{}", name);
    }
    Ok(())
}

#[test]
fn test_empty_episode() -> Result<()> {
    let env = env()?;
    for (name, mut agent) in agents()? {
        agent.start_environment(&env)?;
        agent.start_episode()?;
        assert_eq!(agent.finish_episode(END)?, 0.0, "{}", name);
        assert_eq!(agent.dump_values()?[START], vec![1.0, 1.0], "{}", name);
        assert_eq!(agent.dump_values()?[END], vec![0.0, 0.0], "{}", name);
        assert_eq!(agent.episodes(), 1, "{}", name);
    }
    Ok(())
}

#[test]
fn test_sample_has_no_side_effects() -> Result<()> {
    let mut env = env()?;
    for (name, mut agent) in agents()? {
        run_episodes(agent.as_mut(), &mut env, 20)?;
        let values = agent.dump_values()?;
        let episodes = agent.episodes();
        for _ in 0..10 {
            agent.sample(START)?;
        }
        assert_eq!(agent.dump_values()?, values, "{}", name);
        assert_eq!(agent.episodes(), episodes, "{}", name);
    }
    Ok(())
}

#[test]
fn test_greedy_sample_tie_break() -> Result<()> {
    let env = env()?;
    for (name, mut agent) in agents()? {
        agent.start_environment(&env)?;
        for _ in 0..10 {
            assert_eq!(agent.sample(START)?, LEFT, "{}", name);
        }
    }
    Ok(())
}

#[test]
fn test_invalid_config() {
    let bad_explorer = EpsilonGreedy::with_schedule(EpsilonSchedule::Power {
        exponent: 0.4,
        eps_min: 0.0,
    });
    assert!(matches!(
        MonteCarlo::<TwoDoors>::build(MonteCarloConfig::default().explorer(bad_explorer)),
        Err(AgentError::InvalidConfig(_))
    ));
    assert!(matches!(
        TdZero::<TwoDoors>::build(TdZeroConfig::default().step_size(1.5)),
        Err(AgentError::InvalidConfig(_))
    ));
    assert!(matches!(
        TdLambda::<TwoDoors>::build(TdLambdaConfig::default().trace_decay(-0.1)),
        Err(AgentError::InvalidConfig(_))
    ));
}

#[test]
fn test_epsilon_follows_episodes() -> Result<()> {
    let mut env = env()?;
    let config = TdZeroConfig::default().explorer(EpsilonGreedy::with_schedule(
        EpsilonSchedule::Power {
            exponent: 0.5,
            eps_min: 0.05,
        },
    ));
    let mut agent = TdZero::<TwoDoors>::build(config)?;
    assert_eq!(Agent::<TwoDoors>::epsilon(&agent), 1.0);
    run_episodes(&mut agent, &mut env, 4)?;
    assert_eq!(Agent::<TwoDoors>::episodes(&agent), 4);
    assert!((Agent::<TwoDoors>::epsilon(&agent) - 0.5).abs() < 1e-12);
    Ok(())
}
