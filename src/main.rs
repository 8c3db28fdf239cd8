use anyhow::{bail, Context, Result};
use bitvec::prelude::*;
use itertools::Itertools;
use regex::Regex;
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Reverse;
use std::iter::zip;
use tracing_subscriber::fmt::SubscriberBuilder;

mod hull;
use hull::{bounding_box, convex_hull, Point};

fn day1(part: u8, input: &str) -> Result<String> {
    let changes = input.trim().lines().map(|line|
        line.trim().parse::<i64>().with_context(|| format!("cannot parse {:?} as a frequency change", line))
    ).collect::<Result<Vec<_>>>()?;
    if part == 1 {return Ok(changes.iter().sum::<i64>().to_string())}
    if changes.is_empty() {bail!("no frequency changes given")}

    // a repeat is some prefix sum shifted by whole passes, so the span bounds the passes needed
    let prefix = changes.iter().scan(0, |freq, change| {*freq += change; Some(*freq)}).collect::<Vec<_>>();
    let drift = prefix[prefix.len() - 1];
    let passes = if drift == 0 {1} else {
        let (min, max) = prefix.iter().chain([&0]).minmax().into_option().unwrap_or((&0, &0));
        (max - min) / drift.abs() + 2
    };

    let mut reached = FxHashSet::default();
    reached.insert(0);
    let mut freq = 0;
    for change in changes.iter().cycle().take(passes as usize * changes.len()) {
        freq += change;
        if !reached.insert(freq) {return Ok(freq.to_string())}
    }
    bail!("no frequency is ever reached twice")
}

fn day2(part: u8, input: &str) -> Result<String> {
    let ids = input.trim().lines().map(str::trim).collect::<Vec<_>>();
    if part == 1 {
        let (twice, thrice) = ids.iter().fold((0usize, 0usize), |(twice, thrice), id| {
            let counts = id.chars().counts();
            (
                twice + counts.values().any(|&n| n == 2) as usize,
                thrice + counts.values().any(|&n| n == 3) as usize,
            )
        });
        Ok((twice * thrice).to_string())
    } else {
        ids.iter().tuple_combinations().find_map(|(a, b)| {
            let pairs = zip(a.chars(), b.chars());
            (
                a.chars().count() == b.chars().count() &&
                pairs.clone().filter(|(x, y)| x != y).count() == 1
            ).then(|| pairs.filter_map(|(x, y)| (x == y).then_some(x)).collect::<String>())
        }).context("no two box IDs differ by exactly one letter")
    }
}

fn day3(part: u8, input: &str) -> Result<String> {
    let re = Regex::new(r"^#(\d+) @ (\d+),(\d+): (\d+)x(\d+)$")?;
    let claims = input.trim().lines().map(|line| -> Result<[usize; 5]> {
        let caps = re.captures(line.trim()).with_context(|| format!("cannot parse claim {:?}", line))?;
        let [id, x, y, w, h] = std::array::from_fn(|i| caps[i + 1].parse::<usize>());
        Ok([id?, x?, y?, w?, h?])
    }).collect::<Result<Vec<_>>>()?;

    let width = claims.iter().map(|&[_, x, _, w, _]| x + w).max().unwrap_or(0);
    let height = claims.iter().map(|&[_, _, y, _, h]| y + h).max().unwrap_or(0);
    let cells = move |&[_, x, y, w, h]: &[usize; 5]|
        (y .. y + h).flat_map(move |row| (x .. x + w).map(move |col| row * width + col));

    let mut seen = bitvec![0; width * height];
    let mut shared = bitvec![0; width * height];
    for claim in &claims {
        for cell in cells(claim) {
            if seen[cell] {shared.set(cell, true)} else {seen.set(cell, true)}
        }
    }

    if part == 1 {
        Ok(shared.count_ones().to_string())
    } else {
        claims.iter().find(|&claim| cells(claim).all(|cell| !shared[cell]))
              .map(|&[id, ..]| id.to_string())
              .context("every claim overlaps another")
    }
}

fn day4(part: u8, input: &str) -> Result<String> {
    let re = Regex::new(
        r"^\[\d{4}-\d{2}-\d{2} \d{2}:(\d{2})\] (?:Guard #(\d+) begins shift|(falls asleep)|wakes up)$"
    )?;
    let mut lines = input.trim().lines().map(str::trim).collect::<Vec<_>>();
    lines.sort_unstable();

    let mut asleep: FxHashMap<usize, [u32; 60]> = FxHashMap::default();
    let mut guard = None;
    let mut fell_at = None;
    for line in lines {
        let caps = re.captures(line).with_context(|| format!("cannot parse log entry {:?}", line))?;
        let minute = caps[1].parse::<usize>()?;
        if minute >= 60 {bail!("minute out of range in {:?}", line)}

        if let Some(id) = caps.get(2) {
            guard = Some(id.as_str().parse::<usize>()?);
            fell_at = None;
        } else if caps.get(3).is_some() {
            if guard.is_none() {bail!("{:?} happens before any shift", line)}
            fell_at = Some(minute);
        } else {
            let id = guard.with_context(|| format!("{:?} happens before any shift", line))?;
            let from = fell_at.take().with_context(|| format!("{:?} without falling asleep first", line))?;
            if minute < from {bail!("{:?} wakes before falling asleep", line)}
            let minutes = asleep.entry(id).or_insert([0; 60]);
            for m in from .. minute {minutes[m] += 1}
        }
    }

    if part == 1 {
        let (&id, minutes) = asleep.iter()
            .max_by_key(|&(&id, minutes)| (minutes.iter().sum::<u32>(), Reverse(id)))
            .context("no guard ever falls asleep")?;
        let minute = minutes.iter().position_min_by_key(|&&n| Reverse(n)).unwrap_or(0);
        Ok((id * minute).to_string())
    } else {
        // a minute shared by several top sleepers does not single anyone out
        (0 .. 60).filter_map(|minute| {
            match asleep.iter().max_set_by_key(|&(_, minutes)| minutes[minute])[..] {
                [(&id, minutes)] if minutes[minute] > 0 => Some((minutes[minute], Reverse(minute), id)),
                _ => None
            }
        }).max()
          .map(|(_, Reverse(minute), id)| (id * minute).to_string())
          .context("no guard is most often asleep on any single minute")
    }
}

fn react(units: impl IntoIterator<Item = u8>) -> Vec<u8> {
    let mut stack: Vec<u8> = Vec::new();
    for unit in units {
        match stack.last() {
            Some(&top) if top != unit && top.eq_ignore_ascii_case(&unit) => {stack.pop();},
            _ => stack.push(unit)
        }
    }
    stack
}

fn day5(part: u8, input: &str) -> Result<String> {
    let polymer = input.trim();
    if let Some(bad) = polymer.bytes().find(|b| !b.is_ascii_alphabetic()) {
        bail!("unexpected unit {:?} in polymer", bad as char)
    }

    let reacted = react(polymer.bytes());
    if part == 1 {return Ok(reacted.len().to_string())}

    // reaction is confluent, so the reacted polymer is as good a start as the raw one
    Ok(reacted.iter().map(u8::to_ascii_lowercase).unique().map(|removed|
        react(reacted.iter().copied().filter(|unit| unit.to_ascii_lowercase() != removed)).len()
    ).min().unwrap_or(0).to_string())
}

fn day6(part: u8, input: &str) -> Result<String> {
    chronal_areas(part, input, 10000)
}

fn chronal_areas(part: u8, input: &str, threshold: u64) -> Result<String> {
    let points = input.trim().lines().map(str::parse::<Point>).collect::<Result<Vec<_>>>()?;
    let hull = convex_hull(points.iter().copied());
    let (low, high) = bounding_box(&hull).context("no coordinates given")?;
    tracing::debug!(points = points.len(), hull = hull.len(), ?low, ?high, "chronal bounds");

    if part == 1 {
        let mut areas = vec![0usize; points.len()];
        let mut infinite = bitvec![0; points.len()];
        for (y, x) in (low.y ..= high.y).cartesian_product(low.x ..= high.x) {
            let cell = Point::new(x, y);
            if let [owner] = (0 .. points.len()).min_set_by_key(|&i| points[i].manhattan(cell))[..] {
                areas[owner] += 1;
                if x == low.x || x == high.x || y == low.y || y == high.y {infinite.set(owner, true)}
            }
        }
        infinite.iter_zeros().map(|i| areas[i]).max()
                .map(|area| area.to_string())
                .context("every area is infinite")
    } else {
        // every point is further than threshold / n away from any cell beyond this margin
        let margin = (threshold / points.len() as u64) as i64;
        let (rows, cols) = (
            low.y.saturating_sub(margin) ..= high.y.saturating_add(margin),
            low.x.saturating_sub(margin) ..= high.x.saturating_add(margin),
        );
        Ok(rows.cartesian_product(cols)
            .filter(|&(y, x)| {
                let cell = Point::new(x, y);
                points.iter().map(|p| p.manhattan(cell)).fold(0, u64::saturating_add) < threshold
            }).count().to_string())
    }
}

fn parse_part(part_arg: &str) -> Result<u8> {
    match part_arg {
        "1" => Ok(1),
        "2" => Ok(2),
        _ => bail!("part must be 1 or 2, not {:?}", part_arg)
    }
}

fn prompt_day() -> Result<usize> {
    let stdin = std::io::stdin();
    loop {
        println!("Which day do you want to see?");
        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {bail!("no day given")}
        match line.trim().parse() {
            Ok(day) => return Ok(day),
            Err(_) => println!("Input an integer, {} is not an integer :)\n", line.trim())
        }
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).with_writer(std::io::stderr).init();
    let days = [
      day1, day2, day3, day4, day5, day6
    ];

    let args = std::env::args().collect::<Vec<_>>();
    let (day, parts, fname) = match &args[..] {
        [_] => {
            let day = prompt_day()?;
            (day, vec![1, 2], format!("day{}.in", day))
        },
        [_, day_arg, part_arg] => (day_arg.parse::<usize>()?, vec![parse_part(part_arg)?], format!("day{}.in", day_arg)),
        [_, day_arg, test_arg, part_arg] => (
            day_arg.parse::<usize>()?, vec![parse_part(part_arg)?], format!("day{}test{}.in", day_arg, test_arg)
        ),
        _ => {
            println!("expected no arguments, or day number, optionally test number and 1/2 for part");
            std::process::exit(1);
        }
    };

    let solve = day.checked_sub(1).and_then(|i| days.get(i)).with_context(|| format!("day {} is not solved", day))?;
    let input = std::fs::read_to_string(&fname).with_context(|| format!("cannot read {}", fname))?;
    tracing::info!(file = %fname, bytes = input.len(), "read input");

    for part in parts {
        let time = std::time::Instant::now();
        println!("{}", solve(part, &input)?);
        let elapsed = time.elapsed().as_secs_f32();
        tracing::info!(day, part, elapsed, "solved");
        println!("{} seconds elapsed", elapsed);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> String {raw.join("\n")}

    #[test]
    fn day1_sums_changes() {
        assert_eq!(day1(1, &lines(&["+1", "-2", "+3", "+1"])).unwrap(), "3");
        assert_eq!(day1(1, &lines(&["+1", "+1", "-2"])).unwrap(), "0");
        assert_eq!(day1(1, &lines(&["-1", "-2", "-3"])).unwrap(), "-6");
    }

    #[test]
    fn day1_empty_input_sums_to_zero() {
        assert_eq!(day1(1, "").unwrap(), "0");
        assert_eq!(day1(1, "\n").unwrap(), "0");
    }

    #[test]
    fn day1_finds_first_repeat() {
        assert_eq!(day1(2, &lines(&["+1", "-2", "+3", "+1"])).unwrap(), "2");
        assert_eq!(day1(2, &lines(&["+1", "-1"])).unwrap(), "0");
        assert_eq!(day1(2, &lines(&["+3", "+3", "+4", "-2", "-4"])).unwrap(), "10");
        assert_eq!(day1(2, &lines(&["-6", "+3", "+8", "+5", "-6"])).unwrap(), "5");
        assert_eq!(day1(2, &lines(&["+7", "+7", "-2", "-7", "-4"])).unwrap(), "14");
    }

    #[test]
    fn day1_rejects_bad_input() {
        assert!(day1(2, "+1\n+2").is_err());
        assert!(day1(1, "+1\nplus two").is_err());
        assert!(day1(2, "").is_err());
    }

    #[test]
    fn day2_checksum() {
        let ids = lines(&["abcdef", "bababc", "abbcde", "abcccd", "aabcdd", "abcdee", "ababab"]);
        assert_eq!(day2(1, &ids).unwrap(), "12");
    }

    #[test]
    fn day2_common_letters() {
        let ids = lines(&["abcde", "fghij", "klmno", "pqrst", "fguij", "axcye", "wvxyz"]);
        assert_eq!(day2(2, &ids).unwrap(), "fgij");
        assert!(day2(2, &lines(&["abc", "xyz"])).is_err());
    }

    const CLAIMS: &str = "#1 @ 1,3: 4x4\n#2 @ 3,1: 4x4\n#3 @ 5,5: 2x2\n";

    #[test]
    fn day3_overlapping_inches() {
        assert_eq!(day3(1, CLAIMS).unwrap(), "4");
    }

    #[test]
    fn day3_intact_claim() {
        assert_eq!(day3(2, CLAIMS).unwrap(), "3");
        assert!(day3(2, "#1 @ 0,0: 2x2\n#2 @ 1,1: 2x2").is_err());
        assert!(day3(1, "#1 @ 0,0 2x2").is_err());
    }

    const GUARD_LOG: &str = "\
[1518-11-01 00:00] Guard #10 begins shift
[1518-11-01 00:05] falls asleep
[1518-11-01 00:25] wakes up
[1518-11-01 00:30] falls asleep
[1518-11-01 00:55] wakes up
[1518-11-01 23:58] Guard #99 begins shift
[1518-11-02 00:40] falls asleep
[1518-11-02 00:50] wakes up
[1518-11-03 00:05] Guard #10 begins shift
[1518-11-03 00:24] falls asleep
[1518-11-03 00:29] wakes up
[1518-11-04 00:02] Guard #99 begins shift
[1518-11-04 00:36] falls asleep
[1518-11-04 00:46] wakes up
[1518-11-05 00:03] Guard #99 begins shift
[1518-11-05 00:45] falls asleep
[1518-11-05 00:55] wakes up
";

    #[test]
    fn day4_sleepiest_guard() {
        assert_eq!(day4(1, GUARD_LOG).unwrap(), "240");
    }

    #[test]
    fn day4_most_regular_minute() {
        assert_eq!(day4(2, GUARD_LOG).unwrap(), "4455");
    }

    #[test]
    fn day4_sorts_log_first() {
        let shuffled = GUARD_LOG.lines().rev().join("\n");
        assert_eq!(day4(1, &shuffled).unwrap(), "240");
        assert_eq!(day4(2, &shuffled).unwrap(), "4455");
    }

    #[test]
    fn day4_skips_tied_minutes() {
        let log = lines(&[
            "[1518-11-01 00:00] Guard #2 begins shift",
            "[1518-11-01 00:10] falls asleep",
            "[1518-11-01 00:12] wakes up",
            "[1518-11-02 00:00] Guard #3 begins shift",
            "[1518-11-02 00:10] falls asleep",
            "[1518-11-02 00:11] wakes up",
            "[1518-11-02 00:30] falls asleep",
            "[1518-11-02 00:31] wakes up",
        ]);
        // minute 10 is tied between both guards, minute 11 belongs to guard 2
        assert_eq!(day4(2, &log).unwrap(), "22");
    }

    #[test]
    fn day4_rejects_wake_without_sleep() {
        let log = lines(&["[1518-11-01 00:00] Guard #2 begins shift", "[1518-11-01 00:12] wakes up"]);
        assert!(day4(1, &log).is_err());
        assert!(day4(1, "[1518-11-01 00:05] falls asleep").is_err());
    }

    #[test]
    fn react_annihilates_opposite_cases() {
        assert!(react(*b"aA").is_empty());
        assert!(react(*b"abBA").is_empty());
        assert_eq!(react(*b"abAB"), b"abAB");
        assert_eq!(react(*b"aabAAB"), b"aabAAB");
        assert_eq!(react(*b"dabAcCaCBAcCcaDA"), b"dabCBAcaDA");
    }

    #[test]
    fn day5_polymer_lengths() {
        assert_eq!(day5(1, "dabAcCaCBAcCcaDA\n").unwrap(), "10");
        assert_eq!(day5(2, "dabAcCaCBAcCcaDA\n").unwrap(), "4");
        assert_eq!(day5(2, "").unwrap(), "0");
        assert!(day5(1, "ab1").is_err());
    }

    const COORDINATES: &str = "1, 1\n1, 6\n8, 3\n3, 4\n5, 5\n8, 9\n";

    #[test]
    fn day6_largest_finite_area() {
        assert_eq!(day6(1, COORDINATES).unwrap(), "17");
    }

    #[test]
    fn day6_safe_region() {
        assert_eq!(chronal_areas(2, COORDINATES, 32).unwrap(), "16");
    }

    #[test]
    fn day6_extreme_coordinates_do_not_overflow() {
        let corner = format!("{}, {}", i64::MAX, i64::MIN);
        assert!(day6(1, &corner).is_err());
        assert_eq!(chronal_areas(2, &corner, 1).unwrap(), "1");
    }

    #[test]
    fn day6_rejects_bad_input() {
        assert!(day6(1, "").is_err());
        assert!(day6(1, "3, 4").is_err());
        assert!(day6(1, "1; 1").is_err());
    }

    #[test]
    fn part_argument() {
        assert_eq!(parse_part("1").unwrap(), 1);
        assert_eq!(parse_part("2").unwrap(), 2);
        assert!(parse_part("3").is_err());
        assert!(parse_part("b").is_err());
    }
}
