// Unit parsing tests
mod sigfigs;

// Equation tests
mod equation_parsing;

// Stoichiometry tests
mod formula;
