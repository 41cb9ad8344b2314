use afl::fuzz;
use chrono::{Days, NaiveDate};
use pesel::{
    assert_valid, decode_birth_date, decode_gender, GenerationParams, Gender, Generator, Pesel,
    PeselChecksum, PeselValidationError, Validator,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

#[cfg(not(feature = "manual_test"))]
fn main() {
    fuzz!(|data: &[u8]| {
        run_raw_fuzz(data);
    });
}

#[cfg(feature = "manual_test")]
fn main() {
    use std::io::{stdin, Read};

    let mut input = vec![];
    stdin().read_to_end(&mut input).unwrap();
    run_raw_fuzz(&input);
}

fn split_bytes_once(input: &[u8]) -> Option<(&[u8], &[u8])> {
    if let Some(i) = input.iter().position(|b| *b == b',') {
        Some((&input[0..i], &input[i + 1..]))
    } else {
        None
    }
}

fn run_raw_fuzz(bytes: &[u8]) -> Option<()> {
    let (input, rand_seed) = split_bytes_once(bytes)?;
    let input_str = std::str::from_utf8(input).ok()?;

    let mut rng_seed: u64 = 0;
    for i in 0..8 {
        if rand_seed.len() > i {
            rng_seed <<= 8;
            rng_seed += rand_seed[i] as u64;
        }
    }

    check_validation(input_str);

    let rng = StdRng::seed_from_u64(rng_seed);
    check_generation(rng);

    Some(())
}

fn check_validation(input: &str) {
    let result = assert_valid(input);

    #[cfg(feature = "manual_test")]
    {
        println!("Input: {:?}", input);
        println!("Result: {:?}", result);
    }

    // the value type and the predicate must agree
    assert_eq!(result.is_ok(), Pesel::new(input).is_ok());

    match result {
        Ok(()) => {
            assert!(PeselChecksum.is_valid_match(input));
            assert!(decode_birth_date(input).is_ok());
            assert!(decode_gender(input).is_ok());
        }
        Err(PeselValidationError::InvalidBirthDate) => {
            assert!(PeselChecksum.is_valid_match(input));
            assert!(decode_birth_date(input).is_err());
        }
        Err(PeselValidationError::InvalidChecksum) => {
            assert!(!PeselChecksum.is_valid_match(input));
        }
        Err(err) => assert!(err.is_format_error()),
    }
}

fn gen_date(rng: &mut StdRng) -> NaiveDate {
    // reaches a century past each side of the encodable range
    let start = NaiveDate::from_ymd_opt(1700, 1, 1).unwrap();
    start
        .checked_add_days(Days::new(rng.gen_range(0..(700 * 366))))
        .unwrap()
}

fn check_generation(mut rng: StdRng) {
    let mut params = GenerationParams::new();
    if rng.gen_bool(0.5) {
        params = params.gender(if rng.gen_bool(0.5) {
            Gender::Male
        } else {
            Gender::Female
        });
    }
    if rng.gen_bool(0.7) {
        params = params.min_date(gen_date(&mut rng));
    }
    if rng.gen_bool(0.7) {
        params = params.max_date(gen_date(&mut rng));
    }

    let generator = Generator::new(&params);
    let generated = generator.generate_with_rng(&mut rng);

    #[cfg(feature = "manual_test")]
    {
        println!("Params: {:?}", params);
        println!("Generated: {:?}", generated);
    }

    assert_eq!(assert_valid(&generated), Ok(()));
    let birth_date = decode_birth_date(&generated).unwrap();
    assert!(birth_date >= generator.min_date() && birth_date <= generator.max_date());
    if let Some(gender) = params.gender {
        assert_eq!(decode_gender(&generated), Ok(gender));
    }
}
