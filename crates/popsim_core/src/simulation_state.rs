//! Runtime state for the simulation: the population store, the event queue,
//! the generator, and the sampling distributions, mutated as events fire.

use jiff::civil::Date;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::SimulationConfig;
use crate::date_math::at_age;
use crate::distribution::{
    BirthDistribution, LifeExpectancy, PopulationDistribution, SalaryDistribution,
};
use crate::error::{ConfigError, Result};
use crate::model::{Event, Gender, Person, PersonId};
use crate::population::Population;
use crate::scheduler::EventQueue;

#[derive(Debug, Clone)]
pub struct Timeline {
    pub start_date: Date,
    pub end_date: Date,
    pub current_date: Date,
}

/// The distributions every registration samples from, in a fixed order.
#[derive(Debug, Clone)]
struct Distributions {
    population: PopulationDistribution,
    life_expectancy: LifeExpectancy,
    salary: SalaryDistribution,
    birth: BirthDistribution,
}

#[derive(Debug, Clone, Copy)]
struct LifecyclePolicy {
    employment_age: i16,
    male_retirement_age: i16,
    female_retirement_age: i16,
}

/// All mutable state of one simulation run.
///
/// Single-threaded: `register` and `drain` are the only mutation paths, and
/// the one re-entrancy concern (a birth event registering a child mid-drain)
/// is structural recursion on one call stack, handled by the queue's
/// pop-minimum drain discipline.
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub timeline: Timeline,
    pub population: Population,
    pub queue: EventQueue,
    rng: SmallRng,
    distributions: Distributions,
    lifecycle: LifecyclePolicy,
}

impl SimulationState {
    /// Validate the configuration, seed the generator, and synthesize the
    /// initial cohort. Every cohort member is registered exactly as later
    /// newborns are, so their lifecycle events are queued before the first
    /// cursor step.
    pub fn from_config(config: &SimulationConfig, seed: u64) -> Result<Self> {
        if config.start_date >= config.end_date {
            return Err(ConfigError::EmptyDateRange {
                start: config.start_date,
                end: config.end_date,
            }
            .into());
        }

        let distributions = Distributions {
            population: PopulationDistribution::new(
                &config.age_knots,
                &config.age_weights,
                config.male_fraction,
            )?,
            life_expectancy: LifeExpectancy::new(
                config.male_life_expectancy,
                config.female_life_expectancy,
            )?,
            salary: SalaryDistribution::new(config.salary_mean, config.salary_std_dev)?,
            birth: BirthDistribution::new(
                config.birth_rate_per_woman,
                config.mean_delivery_age,
                config.fertility_window,
            )?,
        };

        let mut state = Self {
            timeline: Timeline {
                start_date: config.start_date,
                end_date: config.end_date,
                current_date: config.start_date,
            },
            population: Population::new(),
            queue: EventQueue::new(),
            rng: SmallRng::seed_from_u64(seed),
            distributions,
            lifecycle: LifecyclePolicy {
                employment_age: config.employment_age,
                male_retirement_age: config.male_retirement_age,
                female_retirement_age: config.female_retirement_age,
            },
        };

        for _ in 0..config.initial_population {
            let (birth_date, gender) = state
                .distributions
                .population
                .sample(&mut state.rng, config.start_date)?;
            state.register(birth_date, gender)?;
        }

        Ok(state)
    }

    /// Register a person and schedule their whole lifecycle.
    ///
    /// Assigns the next id, inserts the record with salary 0, and schedules:
    /// the death event, the employment-start event at the employment age
    /// with a pre-sampled salary, the retirement event at the
    /// gender-dependent age, and, for women, one birth event per child
    /// whose delivery date is not already behind the cursor. Same-date
    /// events keep exactly this insertion order, which keeps runs
    /// reproducible.
    pub fn register(&mut self, birth_date: Date, gender: Gender) -> Result<PersonId> {
        let id = self.population.insert(Person::new(birth_date, gender));

        let death_date =
            self.distributions
                .life_expectancy
                .death_date(&mut self.rng, birth_date, gender)?;
        self.queue.schedule(death_date, Event::Death { person: id });

        let employment_date = at_age(self.lifecycle.employment_age, birth_date)?;
        let salary = self.distributions.salary.sample(&mut self.rng);
        self.queue
            .schedule(employment_date, Event::EmploymentStart { person: id, salary });

        let retirement_age = match gender {
            Gender::Male => self.lifecycle.male_retirement_age,
            Gender::Female => self.lifecycle.female_retirement_age,
        };
        self.queue
            .schedule(at_age(retirement_age, birth_date)?, Event::Retirement {
                person: id,
            });

        if gender == Gender::Female {
            let deliveries =
                self.distributions
                    .birth
                    .generate(&mut self.rng, birth_date, death_date)?;
            for (child_birth_date, child_gender) in deliveries {
                if child_birth_date < self.timeline.current_date {
                    continue;
                }
                self.queue.schedule(child_birth_date, Event::Birth {
                    birth_date: child_birth_date,
                    gender: child_gender,
                });
            }
        }

        Ok(id)
    }

    /// Fire and discard every pending event with a trigger date at or before
    /// `cutoff`, in ascending-date then insertion order.
    ///
    /// Events scheduled by actions fired during this call are included when
    /// their date is within the cutoff: a birth registers a child whose own
    /// events land back on the queue, and the pop-minimum loop re-reads the
    /// earliest pending date on every iteration until none remain due.
    pub fn drain(&mut self, cutoff: Date) -> Result<()> {
        while let Some((_, event)) = self.queue.pop_due(cutoff) {
            self.apply(event)?;
        }
        Ok(())
    }

    /// Apply one event against the authoritative records.
    ///
    /// Lookups happen here, at fire time: an event whose person has already
    /// been removed is a no-op.
    fn apply(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Death { person } => {
                self.population.remove(person);
            }
            Event::EmploymentStart { person, salary } => {
                if let Some(record) = self.population.get_mut(person) {
                    record.salary = salary;
                }
            }
            Event::Retirement { person } => {
                if let Some(record) = self.population.get_mut(person) {
                    record.salary = 0;
                }
            }
            Event::Birth { birth_date, gender } => {
                self.register(birth_date, gender)?;
            }
        }
        Ok(())
    }

    /// Advance the cursor to `date` without firing anything.
    pub fn advance_to(&mut self, date: Date) {
        self.timeline.current_date = date;
    }
}
