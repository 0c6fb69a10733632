//! Seeded sampling tests: 10,000-draw empirical means against the closed
//! (or quadrature) means, using a Mersenne twister engine owned by the
//! caller.

use extradistr::*;
use rand_mt::Mt64;

const N: usize = 10_000;

fn check_mean_continuous<D: ContinuousDistribution>(d: &D, rng: &mut Mt64) {
    let mean = d.mean();
    let std = d.std();
    assert!(
        mean.is_finite() && std.is_finite(),
        "{}: pick parameters with finite variance for this test",
        d.name()
    );
    let empirical = d.sample_n(rng, N).iter().sum::<f64>() / N as f64;
    let se = std / (N as f64).sqrt();
    assert!(
        (empirical - mean).abs() < 6.0 * se + 1e-3,
        "{}: empirical mean {empirical} vs {mean} (se {se})",
        d.name()
    );
}

fn check_mean_discrete<D: DiscreteDistribution>(d: &D, rng: &mut Mt64) {
    let mean = d.mean();
    let std = d.std();
    assert!(
        mean.is_finite() && std.is_finite(),
        "{}: pick parameters with finite variance for this test",
        d.name()
    );
    let empirical = d.sample_n(rng, N).iter().map(|&k| k as f64).sum::<f64>() / N as f64;
    let se = std / (N as f64).sqrt();
    assert!(
        (empirical - mean).abs() < 6.0 * se + 1e-3,
        "{}: empirical mean {empirical} vs {mean} (se {se})",
        d.name()
    );
}

#[test]
fn continuous_sample_means_converge() {
    let mut rng = Mt64::new(20240811);
    check_mean_continuous(&Argus::new(1.5, 2.0).unwrap(), &mut rng);
    check_mean_continuous(&BenktanderType1::new(2.0, 1.0).unwrap(), &mut rng);
    check_mean_continuous(&BenktanderType2::new(1.5, 0.6).unwrap(), &mut rng);
    check_mean_continuous(&BenktanderType2::new(2.0, 1.0).unwrap(), &mut rng);
    check_mean_continuous(&Bhattacharjee::new(-1.0, 1.5, 2.0).unwrap(), &mut rng);
    check_mean_continuous(&BirnbaumSaunders::new(0.6, 2.0).unwrap(), &mut rng);
    check_mean_continuous(&Burr::new(3.0, 3.0, 1.0).unwrap(), &mut rng);
    check_mean_continuous(&CrystalBall::new(1.0, 4.5, 0.0, 1.0).unwrap(), &mut rng);
    check_mean_continuous(&Dagum::new(1.5, 5.0, 1.0).unwrap(), &mut rng);
    check_mean_continuous(&Gompertz::new(0.8, 1.2).unwrap(), &mut rng);
    check_mean_continuous(&Kumaraswamy::new(2.0, 3.0).unwrap(), &mut rng);
    check_mean_continuous(&LogLogistic::new(1.0, 5.0).unwrap(), &mut rng);
    check_mean_continuous(&Lomax::new(4.0, 2.0).unwrap(), &mut rng);
    check_mean_continuous(&Maxwell::new(1.3).unwrap(), &mut rng);
    check_mean_continuous(&Nakagami::new(1.5, 2.0).unwrap(), &mut rng);
}

#[test]
fn discrete_sample_means_converge() {
    let mut rng = Mt64::new(987654321);
    check_mean_discrete(&BetaBinomial::new(20, 2.0, 3.0).unwrap(), &mut rng);
    check_mean_discrete(&BetaNegBinomial::new(3.0, 6.0, 2.0).unwrap(), &mut rng);
    check_mean_discrete(&Borel::new(0.4).unwrap(), &mut rng);
    check_mean_discrete(&ConwayMaxwellPoisson::new(3.0, 1.5).unwrap(), &mut rng);
    check_mean_discrete(&Delaporte::new(1.5, 1.0, 2.0).unwrap(), &mut rng);
    check_mean_discrete(&DiscreteWeibull::new(0.6, 1.0).unwrap(), &mut rng);
    check_mean_discrete(&Logarithmic::new(0.5).unwrap(), &mut rng);
    check_mean_discrete(&Rademacher::new(), &mut rng);
    check_mean_discrete(&YuleSimon::new(5.0).unwrap(), &mut rng);
    check_mean_discrete(&Zipf::new(20, 1.5).unwrap(), &mut rng);
    check_mean_discrete(&ZeroInflatedPoisson::new(5.0, 0.2).unwrap(), &mut rng);
    check_mean_discrete(&ZeroInflatedBinomial::new(15, 0.4, 0.3).unwrap(), &mut rng);
    check_mean_discrete(&ZeroInflatedNegBinomial::new(2.0, 0.5, 0.25).unwrap(), &mut rng);
}

#[test]
fn samples_stay_in_support() {
    let mut rng = Mt64::new(7);

    let argus = Argus::new(2.0, 3.0).unwrap();
    for _ in 0..1000 {
        let x = argus.sample(&mut rng);
        assert!(x > 0.0 && x < 3.0, "Argus sample {x} outside (0, 3)");
    }

    let kuma = Kumaraswamy::new(0.7, 0.9).unwrap();
    for _ in 0..1000 {
        let x = kuma.sample(&mut rng);
        assert!(x > 0.0 && x < 1.0, "Kumaraswamy sample {x} outside (0, 1)");
    }

    let rad = Rademacher::new();
    for _ in 0..100 {
        let k = rad.sample(&mut rng);
        assert!(k == 1 || k == -1);
    }

    let zipf = Zipf::new(10, 1.0).unwrap();
    for _ in 0..1000 {
        let k = zipf.sample(&mut rng);
        assert!((1..=10).contains(&k), "Zipf sample {k} outside 1..=10");
    }

    let borel = Borel::new(0.5).unwrap();
    for _ in 0..1000 {
        assert!(borel.sample(&mut rng) >= 1);
    }
}

#[test]
fn zero_inflation_produces_excess_zeros() {
    let mut rng = Mt64::new(99);
    let d = ZeroInflatedPoisson::new(5.0, 0.4).unwrap();
    let draws = d.sample_n(&mut rng, N);
    let zeros = draws.iter().filter(|&&k| k == 0).count() as f64 / N as f64;
    // P(0) = 0.4 + 0.6 e^{-5} ≈ 0.404
    assert!((zeros - d.pmf(0)).abs() < 0.02, "zero fraction {zeros}");
}

#[test]
fn crystal_ball_tail_fraction_matches_cdf() {
    let mut rng = Mt64::new(4242);
    let d = CrystalBall::new(1.0, 3.0, 0.0, 1.0).unwrap();
    let junction = -1.0;
    let draws = d.sample_n(&mut rng, N);
    let tail = draws.iter().filter(|&&x| x <= junction).count() as f64 / N as f64;
    assert!(
        (tail - d.cdf(junction)).abs() < 0.02,
        "tail fraction {tail} vs {}",
        d.cdf(junction)
    );
}

#[test]
fn sample_n_length_and_determinism() {
    let d = Lomax::new(3.0, 1.0).unwrap();
    let a = d.sample_n(&mut Mt64::new(1), 100);
    let b = d.sample_n(&mut Mt64::new(1), 100);
    assert_eq!(a.len(), 100);
    assert_eq!(a, b, "same seed must reproduce the same stream");
}
